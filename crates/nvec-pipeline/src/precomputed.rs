use crate::error::PipelineError;
use crate::source::{check_ready, FrameSource};
use nvec_base::{Matrix, Vector};

/// A `FrameSource` backed by an already-extracted feature matrix — the
/// stand-in this crate ships for the real MFCC/PLP/fbank/pitch extractors,
/// which are out of scope. All rows are ready immediately; `accept_waveform`
/// is a no-op since there's no waveform to consume.
pub struct PrecomputedFeatureSource {
    frames: Matrix,
    frame_shift_seconds: f64,
}

impl PrecomputedFeatureSource {
    pub fn new(frames: Matrix, frame_shift_seconds: f64) -> Self {
        Self { frames, frame_shift_seconds }
    }
}

impl FrameSource for PrecomputedFeatureSource {
    fn dim(&self) -> usize {
        self.frames.cols()
    }

    fn num_frames_ready(&self) -> usize {
        self.frames.rows()
    }

    fn is_last_frame(&self, t: usize) -> bool {
        self.frames.rows() > 0 && t + 1 == self.frames.rows()
    }

    fn get_frame(&self, t: usize, out: &mut Vector) -> Result<(), PipelineError> {
        check_ready(t, self.num_frames_ready())?;
        *out = self.frames.row_vector(t);
        Ok(())
    }

    fn accept_waveform(&self, _sample_rate: f64, _samples: &[f64]) -> Result<(), PipelineError> {
        Ok(())
    }

    fn input_finished(&self) {}

    fn frame_shift_seconds(&self) -> f64 {
        self.frame_shift_seconds
    }
}
