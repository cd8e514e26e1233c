use crate::append::Append;
use crate::cmvn::GlobalCmvn;
use crate::config::Config;
use crate::error::PipelineError;
use crate::nvector_view::NVectorView;
use crate::source::FrameSource;
use nvec_estimator::Estimator;
use std::cell::RefCell;
use std::rc::Rc;

/// Wires `base` (and, if `config.add_pitch`, `pitch`) into the full
/// `Base -> [+Pitch] -> [Cmvn] -> [+NVector]` DAG described by `config`.
/// Real MFCC/pitch/CMVN extraction is out of scope; callers supply whatever
/// concrete `FrameSource` stands in for those stages (this crate's own
/// `PrecomputedFeatureSource` in tests, or an external implementation in a
/// real decoder integration).
pub fn build_pipeline(
    config: &Config,
    base: Rc<dyn FrameSource>,
    pitch: Option<Rc<dyn FrameSource>>,
) -> Result<Rc<dyn FrameSource>, PipelineError> {
    for warning in config.lint() {
        log::warn!("{warning}");
    }

    let base_p: Rc<dyn FrameSource> = if config.add_pitch {
        let pitch = pitch.ok_or_else(|| {
            PipelineError::UnmetDependency("add_pitch is set but no pitch source was supplied".into())
        })?;
        Rc::new(Append::new(base.clone(), pitch))
    } else {
        base.clone()
    };

    let norm: Rc<dyn FrameSource> = match &config.cmvn_config {
        Some(stats) => {
            Rc::new(GlobalCmvn::new(base_p.clone(), stats.mean.clone(), stats.variance.clone())?)
        }
        None => base_p.clone(),
    };

    let out: Rc<dyn FrameSource> = match &config.nvector_extraction_config {
        Some(nvec_cfg) => {
            let estimator = Estimator::new(nvec_cfg.noise_prior.clone(), nvec_cfg.nvector_period)?
                .with_max_remembered_frames(nvec_cfg.max_remembered_frames);
            let view = Rc::new(NVectorView::new(base, Rc::new(RefCell::new(estimator))));
            Rc::new(Append::new(norm, view))
        }
        None => norm,
    };

    Ok(out)
}
