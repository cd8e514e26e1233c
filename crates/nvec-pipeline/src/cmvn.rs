use crate::error::PipelineError;
use crate::source::{check_ready, FrameSource};
use nvec_base::Vector;
use std::rc::Rc;

/// Normalizes each frame by a precomputed global mean/variance:
/// `out = (x - mean) / sqrt(var)`. A simplification of Kaldi's full online
/// CMVN (which blends global stats with a running per-utterance window);
/// this crate carries only the global-stats case since the windowed variant
/// needs the same out-of-scope decoder-paced update loop as the n-vector
/// branch itself.
pub struct GlobalCmvn {
    inner: Rc<dyn FrameSource>,
    mean: Vector,
    inv_stddev: Vector,
}

impl GlobalCmvn {
    pub fn new(
        inner: Rc<dyn FrameSource>,
        mean: Vector,
        variance: Vector,
    ) -> Result<Self, PipelineError> {
        if mean.dim() != inner.dim() || variance.dim() != inner.dim() {
            return Err(PipelineError::DimensionMismatch {
                expected: format!("mean and variance of dim {}", inner.dim()),
                got: format!("mean dim {}, variance dim {}", mean.dim(), variance.dim()),
            });
        }
        let mut inv_stddev = Vector::zeros(variance.dim());
        for i in 0..variance.dim() {
            inv_stddev[i] = 1.0 / variance[i].max(1e-12).sqrt();
        }
        Ok(Self { inner, mean, inv_stddev })
    }
}

impl FrameSource for GlobalCmvn {
    fn dim(&self) -> usize {
        self.inner.dim()
    }

    fn num_frames_ready(&self) -> usize {
        self.inner.num_frames_ready()
    }

    fn is_last_frame(&self, t: usize) -> bool {
        self.inner.is_last_frame(t)
    }

    fn get_frame(&self, t: usize, out: &mut Vector) -> Result<(), PipelineError> {
        check_ready(t, self.num_frames_ready())?;
        let mut raw = Vector::zeros(self.inner.dim());
        self.inner.get_frame(t, &mut raw)?;
        let mut normalized = raw.sub(&self.mean);
        for i in 0..normalized.dim() {
            normalized[i] *= self.inv_stddev[i];
        }
        *out = normalized;
        Ok(())
    }

    fn accept_waveform(&self, sample_rate: f64, samples: &[f64]) -> Result<(), PipelineError> {
        self.inner.accept_waveform(sample_rate, samples)
    }

    fn input_finished(&self) {
        self.inner.input_finished();
    }

    fn frame_shift_seconds(&self) -> f64 {
        self.inner.frame_shift_seconds()
    }
}
