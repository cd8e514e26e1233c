use nvec_base::{Matrix, Vector};
use nvec_estimator::{Estimator, EstimatorError};
use nvec_prior::Prior;

fn identity_prior(d: usize) -> Prior {
    Prior {
        mu_n: Vector::zeros(d),
        a: Vector::zeros(d),
        b: Matrix::zeros(d, d),
        lambda_n: Matrix::identity(d),
        lambda_s: Matrix::identity(d),
        r_n: 1.0,
        r_s: 1.0,
    }
}

#[test]
fn new_rejects_zero_period() {
    let prior = identity_prior(2);
    assert_eq!(Estimator::new(prior, 0).unwrap_err(), EstimatorError::InvalidPeriod);
}

#[test]
fn new_initializes_current_to_prior_mean() {
    let mut prior = identity_prior(2);
    prior.mu_n = Vector::from_slice(&[1.0, 2.0]);
    let est = Estimator::new(prior, 4).unwrap();
    assert_eq!(est.current().as_slice(), &[1.0, 2.0, 1.0, 2.0]);
}

// Scenario 1 from the spec's end-to-end scenario list.
#[test]
fn identity_prior_chunk_update_matches_closed_form() {
    let prior = identity_prior(2);
    let mut est = Estimator::new(prior, 4).unwrap();

    let feats = Matrix::from_rows(vec![
        vec![1.0, 0.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![0.0, 1.0],
    ]);
    let labels = [false, false, true, true];
    est.update_chunk(&feats, &labels).unwrap();

    let current = est.current();
    assert!((current[0] - 2.0 / 3.0).abs() < 1e-9);
    assert!((current[1] - 0.0).abs() < 1e-9);
    assert!((current[2] - 0.0).abs() < 1e-9);
    assert!((current[3] - 2.0 / 3.0).abs() < 1e-9);
}

// Scenario 2: an empty chunk recovers the prior (here, zero) mean exactly.
#[test]
fn empty_chunk_recovers_prior_mean() {
    let prior = identity_prior(2);
    let mut est = Estimator::new(prior, 4).unwrap();

    let feats = Matrix::zeros(0, 2);
    est.update_chunk(&feats, &[]).unwrap();

    let current = est.current();
    for i in 0..4 {
        assert!((current[i] - 0.0).abs() < 1e-9);
    }
}

// Scenario 3: scaling-parameter update for an all-silence chunk with a
// constant residual of (1, 0) per frame.
#[test]
fn scaling_update_matches_closed_form() {
    let prior = identity_prior(2);
    let mut est = Estimator::new(prior, 3).unwrap();

    let feats = Matrix::from_rows(vec![vec![4.0, 0.0], vec![4.0, 0.0], vec![4.0, 0.0]]);
    let labels = [false, false, false];
    est.update_chunk(&feats, &labels).unwrap();

    assert!((est.r_n() - 2.0).abs() < 1e-9);
    // No speech frames in this chunk; r_s is untouched from its initial value.
    assert_eq!(est.r_s(), 1.0);
}

#[test]
fn r_n_and_r_s_stay_positive_after_update() {
    let prior = identity_prior(2);
    let mut est = Estimator::new(prior, 2).unwrap();
    let feats = Matrix::from_rows(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
    est.update_chunk(&feats, &[false, true]).unwrap();
    assert!(est.r_n() > 0.0);
    assert!(est.r_s() > 0.0);
}

#[test]
fn history_grows_monotonically_with_update_chunk_calls() {
    let prior = identity_prior(2);
    let mut est = Estimator::new(prior, 2).unwrap();
    let feats = Matrix::from_rows(vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
    for k in 0..5 {
        est.update_chunk(&feats, &[false, true]).unwrap();
        assert_eq!(est.history().len(), k + 1);
    }
}

#[test]
fn extract_emits_ceil_t_over_period_rows() {
    let prior = identity_prior(2);
    let mut est = Estimator::new(prior, 3).unwrap();
    let feats = Matrix::zeros(7, 2);
    let out = est.extract(&feats, None).unwrap();
    assert_eq!(out.rows(), 3); // ceil(7/3)
    assert_eq!(out.cols(), 4);
}

#[test]
fn extract_without_labels_repeats_prior_mean() {
    let mut prior = identity_prior(2);
    prior.mu_n = Vector::from_slice(&[1.0, 2.0]);
    let mut est = Estimator::new(prior, 2).unwrap();
    let feats = Matrix::zeros(4, 2);
    let out = est.extract(&feats, None).unwrap();
    for r in 0..out.rows() {
        assert_eq!(out.row(r), &[1.0, 2.0, 1.0, 2.0]);
    }
}

#[test]
fn all_silence_chunk_moves_speech_half_only_through_b_coupling() {
    let mut prior = identity_prior(2);
    prior.b = Matrix::from_rows(vec![vec![0.5, 0.0], vec![0.0, 0.5]]);
    let mut est = Estimator::new(prior.clone(), 4).unwrap();

    let feats = Matrix::from_rows(vec![
        vec![2.0, 0.0],
        vec![2.0, 0.0],
        vec![2.0, 0.0],
        vec![2.0, 0.0],
    ]);
    est.update_chunk(&feats, &[false, false, false, false]).unwrap();

    let current = est.current();
    let noise_half = current.sub_vector(0, 2).unwrap();
    let speech_half = current.sub_vector(2, 2).unwrap();
    let expected_speech = prior.b.matvec(&noise_half).unwrap();
    for i in 0..2 {
        assert!((speech_half[i] - expected_speech[i]).abs() < 1e-9);
    }
    // The coupling moved the speech half away from the zero prior mean.
    assert!(speech_half.dot(&speech_half) > 1e-9);
}

#[test]
fn all_speech_chunk_leaves_decoupled_noise_half_at_prior_mean() {
    let mut prior = identity_prior(2);
    prior.mu_n = Vector::from_slice(&[3.0, -1.0]);
    let mut est = Estimator::new(prior, 4).unwrap();

    let feats = Matrix::from_rows(vec![
        vec![5.0, 5.0],
        vec![5.0, 5.0],
        vec![5.0, 5.0],
        vec![5.0, 5.0],
    ]);
    est.update_chunk(&feats, &[true, true, true, true]).unwrap();

    let current = est.current();
    // B = 0 decouples noise from speech data entirely.
    assert!((current[0] - 3.0).abs() < 1e-9);
    assert!((current[1] - (-1.0)).abs() < 1e-9);
}

#[test]
fn n_vector_at_falls_back_to_initial_value_before_history_exists() {
    let mut prior = identity_prior(2);
    prior.mu_n = Vector::from_slice(&[9.0, 9.0]);
    let est = Estimator::new(prior, 4).unwrap();
    let v = est.n_vector_at(0);
    assert_eq!(v.as_slice(), &[9.0, 9.0, 9.0, 9.0]);
}

#[test]
fn n_vector_at_returns_the_chunk_covering_the_frame() {
    let prior = identity_prior(2);
    let mut est = Estimator::new(prior, 2).unwrap();
    est.update_chunk(&Matrix::from_rows(vec![vec![1.0, 0.0], vec![1.0, 0.0]]), &[false, false])
        .unwrap();
    est.update_chunk(&Matrix::from_rows(vec![vec![0.0, 1.0], vec![0.0, 1.0]]), &[true, true])
        .unwrap();

    let first_chunk = est.n_vector_at(0);
    let second_chunk = est.n_vector_at(3);
    assert_ne!(first_chunk.as_slice(), second_chunk.as_slice());
    assert_eq!(est.n_vector_at(1).as_slice(), first_chunk.as_slice());
    assert_eq!(est.n_vector_at(2).as_slice(), second_chunk.as_slice());
}

#[test]
fn adaptation_state_round_trips_into_a_fresh_estimator() {
    let prior = identity_prior(2);
    let mut est = Estimator::new(prior, 2).unwrap();
    est.update_chunk(&Matrix::from_rows(vec![vec![2.0, 0.0], vec![2.0, 0.0]]), &[false, false])
        .unwrap();
    let state = est.get_adaptation_state();

    let fresh_prior = identity_prior(2);
    let mut fresh = Estimator::new(fresh_prior, 2).unwrap();
    fresh.set_adaptation_state(state);

    assert_eq!(fresh.current().as_slice(), est.current().as_slice());
    assert_eq!(fresh.frames_seen(), est.frames_seen());
    assert_eq!(fresh.history().len(), 0);
}

#[test]
fn update_chunk_rejects_row_label_mismatch() {
    let prior = identity_prior(2);
    let mut est = Estimator::new(prior, 4).unwrap();
    let feats = Matrix::zeros(2, 2);
    assert!(est.update_chunk(&feats, &[false]).is_err());
}
