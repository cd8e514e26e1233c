use crate::error::OfflineError;
use nvec_base::{Matrix, Vector};

/// Classifies each row of `feats` using a row of `targets` (posteriors for
/// `(silence, speech, garbage)`), returning the mean of the noise
/// (non-speech) rows, optionally concatenated with the mean of the speech
/// rows. Without `targets`, returns the unconditional mean of all rows
/// (`concat_speech` has no effect in that case — there's no speech/noise
/// split to concatenate).
///
/// A class with zero rows contributes a zero vector rather than failing,
/// matching the original tool's unconditional `Scale`-only-if-nonzero
/// behavior.
pub fn compute_offline_nvector(
    feats: &Matrix,
    targets: Option<&Matrix>,
    concat_speech: bool,
) -> Result<Vector, OfflineError> {
    if feats.rows() == 0 {
        return Err(OfflineError::EmptyInput);
    }
    let d = feats.cols();

    let targets = match targets {
        None => return unconditional_mean(feats),
        Some(t) => t,
    };

    if targets.rows() != feats.rows() {
        return Err(OfflineError::DimensionMismatch {
            expected: format!("{} rows", feats.rows()),
            got: format!("{} rows", targets.rows()),
        });
    }
    if targets.cols() != 3 {
        return Err(OfflineError::DimensionMismatch {
            expected: "3 target columns (silence, speech, garbage)".to_string(),
            got: format!("{} columns", targets.cols()),
        });
    }

    let mut noise_feat = Vector::zeros(d);
    let mut speech_feat = Vector::zeros(d);
    let mut num_noise = 0usize;
    let mut num_speech = 0usize;

    let speech_labels = classify_speech_rows(targets);
    for i in 0..feats.rows() {
        let is_speech = speech_labels[i];
        let row = feats.row_vector(i);
        if is_speech {
            speech_feat.add_scaled(1.0, &row);
            num_speech += 1;
        } else {
            noise_feat.add_scaled(1.0, &row);
            num_noise += 1;
        }
    }
    if num_noise > 0 {
        noise_feat.scale(1.0 / num_noise as f64);
    } else {
        log::warn!("no noise frames classified; noise vector is zero");
    }
    if num_speech > 0 {
        speech_feat.scale(1.0 / num_speech as f64);
    } else if concat_speech {
        log::warn!("no speech frames classified; speech vector is zero");
    }

    if concat_speech {
        Ok(noise_feat.concat(&speech_feat))
    } else {
        Ok(noise_feat)
    }
}

/// Classifies each row of `targets` (posteriors for `(silence, speech,
/// garbage)`) as speech (`true`) or noise (`false`). Shared with the online
/// CLI so both tools agree on what counts as speech.
pub fn classify_speech_rows(targets: &Matrix) -> Vec<bool> {
    (0..targets.rows())
        .map(|i| targets.get(i, 1) > targets.get(i, 0) && targets.get(i, 1) > targets.get(i, 2))
        .collect()
}

fn unconditional_mean(feats: &Matrix) -> Result<Vector, OfflineError> {
    let mut sum = Vector::zeros(feats.cols());
    for i in 0..feats.rows() {
        sum.add_scaled(1.0, &feats.row_vector(i));
    }
    sum.scale(1.0 / feats.rows() as f64);
    Ok(sum)
}
