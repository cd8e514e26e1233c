use crate::error::EstimatorError;
use nvec_base::{Matrix, Vector};
use nvec_prior::Prior;

/// Floor for the observation-precision scalars `r_n`, `r_s`; keeps the K
/// matrix well-conditioned even after a degenerate (near-zero-residual) chunk.
const SCALING_FLOOR: f64 = 1e-6;

/// Per-utterance n-vector estimation state. Owns a private, mutable copy of
/// the prior so that `r_n`/`r_s` can evolve without disturbing the
/// process-wide prior shared by other utterances.
#[derive(Debug, Clone)]
pub struct Estimator {
    prior: Prior,
    current: Vector,
    initial: Vector,
    history: Vec<Vector>,
    frames_seen: usize,
    period: usize,
    /// Accepted and carried through `AdaptationState` as a hint only; this
    /// crate never truncates `history` to honor it.
    max_remembered_frames: Option<usize>,
}

/// Snapshot of an estimator's evolved state, for same-speaker carry-over
/// between utterances.
#[derive(Debug, Clone)]
pub struct AdaptationState {
    pub prior: Prior,
    pub current: Vector,
    pub frames_seen: usize,
    pub max_remembered_frames: Option<usize>,
}

impl Estimator {
    pub fn new(prior: Prior, period: usize) -> Result<Self, EstimatorError> {
        if period == 0 {
            return Err(EstimatorError::InvalidPeriod);
        }
        let initial = prior.prior_mean()?;
        Ok(Self {
            prior,
            current: initial.clone(),
            initial,
            history: Vec::new(),
            frames_seen: 0,
            period,
            max_remembered_frames: None,
        })
    }

    /// Records the configured frame-remembering hint for round-tripping
    /// through `AdaptationState`; has no effect on `history` itself.
    pub fn with_max_remembered_frames(mut self, hint: Option<usize>) -> Self {
        self.max_remembered_frames = hint;
        self
    }

    pub fn dim(&self) -> usize {
        self.prior.dim()
    }

    pub fn half_dim(&self) -> usize {
        self.prior.half_dim()
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    pub fn history(&self) -> &[Vector] {
        &self.history
    }

    pub fn current(&self) -> &Vector {
        &self.current
    }

    pub fn r_n(&self) -> f64 {
        self.prior.r_n
    }

    pub fn r_s(&self) -> f64 {
        self.prior.r_s
    }

    /// Returns the n-vector active at input frame `t`: `history[t / period]`,
    /// or the initialization value if that chunk hasn't completed yet.
    pub fn n_vector_at(&self, frame: usize) -> Vector {
        let idx = frame / self.period;
        if idx < self.history.len() {
            self.history[idx].clone()
        } else {
            self.initial.clone()
        }
    }

    pub fn get_adaptation_state(&self) -> AdaptationState {
        AdaptationState {
            prior: self.prior.clone(),
            current: self.current.clone(),
            frames_seen: self.frames_seen,
            max_remembered_frames: self.max_remembered_frames,
        }
    }

    /// Restores evolved state from a prior utterance of the same speaker.
    /// The per-utterance history is reset; only `current`/`frames_seen`/the
    /// evolved prior scalars carry over.
    pub fn set_adaptation_state(&mut self, state: AdaptationState) {
        self.prior = state.prior;
        self.current = state.current.clone();
        self.initial = state.current;
        self.frames_seen = state.frames_seen;
        self.max_remembered_frames = state.max_remembered_frames;
        self.history.clear();
    }

    /// Consumes one chunk of up to `period` base-feature frames with their
    /// silence/speech labels, performs the MAP update, and pushes the
    /// result into `history`.
    pub fn update_chunk(&mut self, feats: &Matrix, labels: &[bool]) -> Result<(), EstimatorError> {
        let d = self.prior.half_dim();
        if feats.cols() != d {
            return Err(EstimatorError::DimensionMismatch {
                expected: format!("{d} cols"),
                got: format!("{} cols", feats.cols()),
            });
        }
        if feats.rows() != labels.len() {
            return Err(EstimatorError::DimensionMismatch {
                expected: format!("{} labels", feats.rows()),
                got: format!("{} labels", labels.len()),
            });
        }

        let mut sigma_s = Vector::zeros(d);
        let mut sigma_n = Vector::zeros(d);
        let mut n_s = 0usize;
        let mut n_n = 0usize;
        for (i, &is_speech) in labels.iter().enumerate() {
            let row = feats.row_vector(i);
            if is_speech {
                n_s += 1;
                sigma_s.add_scaled(1.0, &row);
            } else {
                n_n += 1;
                sigma_n.add_scaled(1.0, &row);
            }
        }

        let lambda_n = &self.prior.lambda_n;
        let lambda_s = &self.prior.lambda_s;
        let b = &self.prior.b;
        let bt = b.transpose();
        let bt_ls = bt.matmul(lambda_s)?;

        // K11 = (1 + r_n n_n) Lambda_n + B^T Lambda_s B
        let mut k11 = lambda_n.clone();
        k11.scale(1.0 + self.prior.r_n * n_n as f64);
        let bt_ls_b = bt_ls.matmul(b)?;
        k11.add_scaled(1.0, &bt_ls_b);

        // K12 = -B^T Lambda_s
        let mut k12 = bt_ls.clone();
        k12.scale(-1.0);

        // K21 = -Lambda_s B
        let mut k21 = lambda_s.matmul(b)?;
        k21.scale(-1.0);

        // K22 = (1 + r_s n_s) Lambda_s
        let mut k22 = lambda_s.clone();
        k22.scale(1.0 + self.prior.r_s * n_s as f64);

        let mut k = Matrix::zeros(2 * d, 2 * d);
        k.set_block(0, 0, &k11)?;
        k.set_block(0, d, &k12)?;
        k.set_block(d, 0, &k21)?;
        k.set_block(d, d, &k22)?;

        // Q1 = Lambda_n (mu_n + r_n Sigma_n) + B^T Lambda_s a
        let mut temp_n = self.prior.mu_n.clone();
        temp_n.add_scaled(self.prior.r_n, &sigma_n);
        let mut q1 = lambda_n.matvec(&temp_n)?;
        let bt_ls_a = bt_ls.matvec(&self.prior.a)?;
        q1.add_scaled(1.0, &bt_ls_a);

        // Q2 = Lambda_s (a + r_s Sigma_s)
        let mut temp_s = self.prior.a.clone();
        temp_s.add_scaled(self.prior.r_s, &sigma_s);
        let q2 = lambda_s.matvec(&temp_s)?;

        let q = q1.concat(&q2);

        let new_current = k.cholesky_solve(&q)?;
        self.current = new_current.clone();
        self.history.push(new_current);
        self.frames_seen += labels.len();

        self.update_scaling_params(feats, labels, n_s, n_n)?;
        Ok(())
    }

    fn update_scaling_params(
        &mut self,
        feats: &Matrix,
        labels: &[bool],
        n_s: usize,
        n_n: usize,
    ) -> Result<(), EstimatorError> {
        let d = self.prior.half_dim();
        let noise_vec = self.current.sub_vector(0, d)?;
        let speech_vec = self.current.sub_vector(d, d)?;

        let mut v_s = Matrix::zeros(d, d);
        let mut v_n = Matrix::zeros(d, d);
        for (i, &is_speech) in labels.iter().enumerate() {
            let row = feats.row_vector(i);
            if is_speech {
                let mut resid = row.clone();
                resid.add_scaled(-1.0, &speech_vec);
                v_s.add_outer(1.0, &resid);
            } else {
                let mut resid = row.clone();
                resid.add_scaled(-1.0, &noise_vec);
                v_n.add_outer(1.0, &resid);
            }
        }

        if n_s > 0 {
            let tr = self.prior.lambda_s.trace_mat_mat(&v_s)?;
            self.prior.r_s = ((d as f64 * n_s as f64) / tr).max(SCALING_FLOOR);
        }
        if n_n > 0 {
            let tr = self.prior.lambda_n.trace_mat_mat(&v_n)?;
            self.prior.r_n = ((d as f64 * n_n as f64) / tr).max(SCALING_FLOOR);
        }
        Ok(())
    }

    /// Produces one n-vector row per `period`-chunk of `feats`, `ceil(T /
    /// period)` rows total. Without `labels`, every row is the prior mean —
    /// the fallback used when no decoder traceback is available yet.
    pub fn extract(
        &mut self,
        feats: &Matrix,
        labels: Option<&[bool]>,
    ) -> Result<Matrix, EstimatorError> {
        let d = self.prior.half_dim();
        if feats.cols() != d {
            return Err(EstimatorError::DimensionMismatch {
                expected: format!("{d} cols"),
                got: format!("{} cols", feats.cols()),
            });
        }
        let t = feats.rows();
        if t == 0 {
            return Ok(Matrix::zeros(0, 2 * d));
        }
        let n_chunks = (t + self.period - 1) / self.period;
        let mut out = Matrix::zeros(n_chunks, 2 * d);

        match labels {
            None => {
                let prior_mean = self.prior.prior_mean()?;
                for i in 0..n_chunks {
                    out.set_row(i, &prior_mean);
                }
            }
            Some(labels) => {
                if labels.len() != t {
                    return Err(EstimatorError::DimensionMismatch {
                        expected: format!("{t} labels"),
                        got: format!("{} labels", labels.len()),
                    });
                }
                for i in 0..n_chunks {
                    let start = i * self.period;
                    let end = (start + self.period).min(t);
                    let chunk_feats = feats.block(start, end - start, 0, d)?;
                    let chunk_labels = &labels[start..end];
                    self.update_chunk(&chunk_feats, chunk_labels)?;
                    let current = self.current.clone();
                    out.set_row(i, &current);
                }
            }
        }
        Ok(out)
    }
}
