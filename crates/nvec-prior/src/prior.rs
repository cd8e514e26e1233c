use crate::error::PriorError;
use nvec_base::{Matrix, Vector};

/// Parameters of the Gaussian model over (noise mean, speech mean),
/// `(mu_n, a, B, Lambda_n, Lambda_s)`, plus the two observation-precision
/// scalars `r_n`, `r_s`. The scalars are part of this struct (so a fresh
/// prior always starts at `r_n = r_s = 1.0`) but, per-utterance, they are
/// expected to evolve on a private clone owned by the estimator — see
/// `nvec-estimator`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prior {
    pub mu_n: Vector,
    pub a: Vector,
    pub b: Matrix,
    pub lambda_n: Matrix,
    pub lambda_s: Matrix,
    pub r_n: f64,
    pub r_s: f64,
}

impl Prior {
    /// Dimension of the concatenated (noise, speech) n-vector, `2 * dim(mu_n)`.
    pub fn dim(&self) -> usize {
        2 * self.mu_n.dim()
    }

    /// The half-dimension `d`, i.e. the dimension of a single base feature frame.
    pub fn half_dim(&self) -> usize {
        self.mu_n.dim()
    }

    /// The prior-mean n-vector `(mu_n, a + B mu_n)`, used both as the MAP
    /// estimate before any data is seen and as the "no decoder" fallback
    /// in `Estimator::extract`.
    pub fn prior_mean(&self) -> Result<Vector, PriorError> {
        let mut speech_mean = self.a.clone();
        let b_mu_n = self.b.matvec(&self.mu_n)?;
        speech_mean.add_scaled(1.0, &b_mu_n);
        Ok(self.mu_n.concat(&speech_mean))
    }
}

/// Estimates prior parameters from training-corpus statistics.
///
/// `mean` and `cov` are the mean and covariance of the concatenated
/// `(noise-frame mean, speech-frame mean)` vector over the training corpus,
/// both of dimension `2 * d`. Fails with `IllConditioned` if `cov` is
/// singular (or if the `Lambda_ss` sub-block of its inverse is singular).
pub fn estimate_prior(mean: &Vector, cov: &Matrix, d: usize) -> Result<Prior, PriorError> {
    if mean.dim() != 2 * d || cov.rows() != 2 * d || cov.cols() != 2 * d {
        return Err(PriorError::FormatError(format!(
            "expected mean/cov of dimension 2*d={} , got mean dim {} and cov ({}, {})",
            2 * d,
            mean.dim(),
            cov.rows(),
            cov.cols()
        )));
    }

    let mu_n = mean.sub_vector(0, d)?;
    let mu_s = mean.sub_vector(d, d)?;

    let lambda = cov.invert()?;

    let lambda_nn = lambda.block(0, d, 0, d)?;
    let lambda_sn = lambda.block(d, d, 0, d)?;
    let lambda_ss = lambda.block(d, d, d, d)?;

    let lambda_ss_inv = lambda_ss.invert()?;

    // B = -(Lambda_ss)^-1 * Lambda_sn
    let mut b = lambda_ss_inv.matmul(&lambda_sn)?;
    b.scale(-1.0);

    // a = mu_s - B * mu_n
    let mut a = mu_s.clone();
    let b_mu_n = b.matvec(&mu_n)?;
    a.add_scaled(-1.0, &b_mu_n);

    Ok(Prior {
        mu_n,
        a,
        b,
        lambda_n: lambda_nn,
        lambda_s: lambda_ss,
        r_n: 1.0,
        r_s: 1.0,
    })
}
