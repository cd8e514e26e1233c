use nvec_base::Vector;
use nvec_prior::Prior;

/// The recognized feature-type selector. Only used to drive the
/// cross-option warnings below: the real extractors it would select are
/// out of scope for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureType {
    #[default]
    Mfcc,
    Plp,
    Fbank,
}

/// Settings controlling which stages of the n-vector feature pipeline are
/// assembled by [`crate::assemble::build_pipeline`]. Mirrors the Kaldi
/// option-table naming (`add_pitch`, `cmvn_config`, ...) so a caller
/// migrating a real Kaldi config can read this one at a glance.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub feature_type: FeatureType,
    pub mfcc_config: Option<String>,
    pub plp_config: Option<String>,
    pub fbank_config: Option<String>,

    pub add_pitch: bool,
    pub online_pitch_config: Option<String>,

    /// Present iff CMVN is enabled; carries the already-parsed global
    /// mean/variance (parsing Kaldi's `global_cmvn_stats` file format is
    /// out of scope here — see DESIGN.md).
    pub cmvn_config: Option<GlobalCmvnStats>,

    pub nvector_extraction_config: Option<NVectorConfig>,

    /// Colon- or comma-separated silence phone ids, forwarded to a
    /// `nvec_silence::SilenceDetector` by the caller; this crate only
    /// stores and parses the string, since the detector sits outside the
    /// `FrameSource` DAG.
    pub silence_phones: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GlobalCmvnStats {
    pub mean: Vector,
    pub variance: Vector,
}

#[derive(Debug, Clone)]
pub struct NVectorConfig {
    pub noise_prior: Prior,
    pub nvector_period: usize,
    pub max_remembered_frames: Option<usize>,
}

impl Config {
    /// Returns one warning per option set without the prerequisite it
    /// depends on, mirroring the original CLI's "option X has no effect
    /// without Y" diagnostics. Doesn't reject anything — only
    /// `build_pipeline`'s own unmet-dependency checks are fatal.
    pub fn lint(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.online_pitch_config.is_some() && !self.add_pitch {
            warnings.push("online_pitch_config set but add_pitch is false".to_string());
        }
        if self.mfcc_config.is_some() && self.feature_type != FeatureType::Mfcc {
            warnings.push("mfcc_config set but feature_type is not mfcc".to_string());
        }
        if self.plp_config.is_some() && self.feature_type != FeatureType::Plp {
            warnings.push("plp_config set but feature_type is not plp".to_string());
        }
        if self.fbank_config.is_some() && self.feature_type != FeatureType::Fbank {
            warnings.push("fbank_config set but feature_type is not fbank".to_string());
        }
        warnings
    }

    pub fn parse_silence_phones(&self) -> Vec<i32> {
        match &self.silence_phones {
            None => Vec::new(),
            Some(s) => s
                .split(|c| c == ':' || c == ',')
                .filter(|t| !t.trim().is_empty())
                .filter_map(|t| t.trim().parse::<i32>().ok())
                .collect(),
        }
    }
}
