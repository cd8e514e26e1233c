use crate::error::PipelineError;
use crate::source::{check_ready, FrameSource};
use nvec_base::Vector;
use std::rc::Rc;

/// Concatenates two frame sources column-wise: frame `t` is `[a.get_frame(t),
/// b.get_frame(t)]`. Used both for appending pitch to a base extractor and
/// for appending the n-vector branch to the normalized feature branch.
pub struct Append {
    a: Rc<dyn FrameSource>,
    b: Rc<dyn FrameSource>,
}

impl Append {
    pub fn new(a: Rc<dyn FrameSource>, b: Rc<dyn FrameSource>) -> Self {
        Self { a, b }
    }
}

impl FrameSource for Append {
    fn dim(&self) -> usize {
        self.a.dim() + self.b.dim()
    }

    fn num_frames_ready(&self) -> usize {
        self.a.num_frames_ready().min(self.b.num_frames_ready())
    }

    fn is_last_frame(&self, t: usize) -> bool {
        self.a.is_last_frame(t) && self.b.is_last_frame(t)
    }

    fn get_frame(&self, t: usize, out: &mut Vector) -> Result<(), PipelineError> {
        check_ready(t, self.num_frames_ready())?;
        let mut left = Vector::zeros(self.a.dim());
        let mut right = Vector::zeros(self.b.dim());
        self.a.get_frame(t, &mut left)?;
        self.b.get_frame(t, &mut right)?;
        *out = left.concat(&right);
        Ok(())
    }

    fn accept_waveform(&self, sample_rate: f64, samples: &[f64]) -> Result<(), PipelineError> {
        self.a.accept_waveform(sample_rate, samples)?;
        self.b.accept_waveform(sample_rate, samples)?;
        Ok(())
    }

    fn input_finished(&self) {
        self.a.input_finished();
        self.b.input_finished();
    }

    fn frame_shift_seconds(&self) -> f64 {
        self.a.frame_shift_seconds()
    }
}
