use crate::error::PipelineError;
use crate::source::{check_ready, FrameSource};
use nvec_base::Vector;
use nvec_estimator::Estimator;
use std::cell::RefCell;
use std::rc::Rc;

/// Exposes an [`Estimator`]'s evolving n-vector as a frame-indexed source.
/// Readiness, `is_last_frame`, and `accept_waveform` all delegate to `base`
/// — the *unnormalized* branch the estimator is built over, per the wiring
/// rule that the n-vector branch watches the raw base features, not the
/// CMVN-normalized ones. `get_frame` never touches `base`'s values; it
/// returns whatever n-vector the estimator currently has for that frame
/// (falling back to the prior mean if the covering chunk hasn't been
/// updated yet — the estimator itself is driven by an external,
/// decoder-paced caller, out of scope for this crate).
pub struct NVectorView {
    base: Rc<dyn FrameSource>,
    estimator: Rc<RefCell<Estimator>>,
}

impl NVectorView {
    pub fn new(base: Rc<dyn FrameSource>, estimator: Rc<RefCell<Estimator>>) -> Self {
        Self { base, estimator }
    }

    pub fn estimator(&self) -> &Rc<RefCell<Estimator>> {
        &self.estimator
    }
}

impl FrameSource for NVectorView {
    fn dim(&self) -> usize {
        self.estimator.borrow().dim()
    }

    fn num_frames_ready(&self) -> usize {
        self.base.num_frames_ready()
    }

    fn is_last_frame(&self, t: usize) -> bool {
        self.base.is_last_frame(t)
    }

    fn get_frame(&self, t: usize, out: &mut Vector) -> Result<(), PipelineError> {
        check_ready(t, self.num_frames_ready())?;
        *out = self.estimator.borrow().n_vector_at(t);
        Ok(())
    }

    fn accept_waveform(&self, sample_rate: f64, samples: &[f64]) -> Result<(), PipelineError> {
        self.base.accept_waveform(sample_rate, samples)
    }

    fn input_finished(&self) {
        self.base.input_finished();
    }

    fn frame_shift_seconds(&self) -> f64 {
        self.base.frame_shift_seconds()
    }
}
