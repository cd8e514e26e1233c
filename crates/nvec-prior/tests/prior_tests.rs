use nvec_base::{Matrix, Vector};
use nvec_prior::{estimate_prior, read_binary, read_text, write_binary, write_text, Prior};
use std::io::Cursor;

fn block_diagonal_prior(d: usize) -> (Vector, Matrix) {
    // mean = 0, cov = identity => Lambda = identity, Lambda_sn = 0, B = 0, a = 0.
    let mean = Vector::zeros(2 * d);
    let cov = Matrix::identity(2 * d);
    (mean, cov)
}

#[test]
fn estimate_prior_rejects_dimension_mismatch() {
    let mean = Vector::zeros(3);
    let cov = Matrix::identity(4);
    assert!(estimate_prior(&mean, &cov, 2).is_err());
}

#[test]
fn estimate_prior_of_independent_blocks_gives_zero_b() {
    let d = 3;
    let (mean, cov) = block_diagonal_prior(d);
    let prior = estimate_prior(&mean, &cov, d).unwrap();

    assert_eq!(prior.half_dim(), d);
    assert_eq!(prior.dim(), 2 * d);
    assert_eq!(prior.r_n, 1.0);
    assert_eq!(prior.r_s, 1.0);

    for r in 0..d {
        for c in 0..d {
            assert!(prior.b.get(r, c).abs() < 1e-9);
        }
    }
    for i in 0..d {
        assert!(prior.a[i].abs() < 1e-9);
    }
}

#[test]
fn estimate_prior_recovers_coupled_speech_mean() {
    // 1-d case: noise mean 2.0, speech mean 5.0, with correlated covariance
    // so that Lambda_sn is nonzero and B != 0.
    let mean = Vector::from_slice(&[2.0, 5.0]);
    let cov = Matrix::from_rows(vec![vec![2.0, 0.5], vec![0.5, 1.0]]);
    let prior = estimate_prior(&mean, &cov, 1).unwrap();

    let prior_mean = prior.prior_mean().unwrap();
    assert!((prior_mean[0] - 2.0).abs() < 1e-9);
    assert!((prior_mean[1] - 5.0).abs() < 1e-9);
}

fn sample_prior() -> Prior {
    let mean = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    let cov = Matrix::from_rows(vec![
        vec![3.0, 0.2, 0.1, 0.0],
        vec![0.2, 2.0, 0.0, 0.1],
        vec![0.1, 0.0, 2.5, 0.3],
        vec![0.0, 0.1, 0.3, 3.5],
    ]);
    estimate_prior(&mean, &cov, 2).unwrap()
}

#[test]
fn binary_round_trip_is_bit_identical() {
    let prior = sample_prior();
    let mut buf = Vec::new();
    write_binary(&mut buf, &prior).unwrap();

    let mut cursor = Cursor::new(buf);
    let restored = read_binary(&mut cursor).unwrap();

    assert_eq!(restored.mu_n.as_slice(), prior.mu_n.as_slice());
    assert_eq!(restored.a.as_slice(), prior.a.as_slice());
    assert_eq!(restored.b.as_slice(), prior.b.as_slice());
    assert_eq!(restored.lambda_n.as_slice(), prior.lambda_n.as_slice());
    assert_eq!(restored.lambda_s.as_slice(), prior.lambda_s.as_slice());
}

#[test]
fn text_round_trip_preserves_full_precision() {
    let prior = sample_prior();
    let mut buf = Vec::new();
    write_text(&mut buf, &prior).unwrap();

    let mut cursor = Cursor::new(buf);
    let restored = read_text(&mut cursor).unwrap();

    assert_eq!(restored.mu_n.as_slice(), prior.mu_n.as_slice());
    assert_eq!(restored.a.as_slice(), prior.a.as_slice());
    assert_eq!(restored.b.as_slice(), prior.b.as_slice());
    assert_eq!(restored.lambda_n.as_slice(), prior.lambda_n.as_slice());
    assert_eq!(restored.lambda_s.as_slice(), prior.lambda_s.as_slice());
}

#[test]
fn read_binary_rejects_missing_open_token() {
    let mut cursor = Cursor::new(b"not the right token\n".to_vec());
    assert!(read_binary(&mut cursor).is_err());
}

#[test]
fn read_text_rejects_missing_close_token() {
    let prior = sample_prior();
    let mut buf = Vec::new();
    write_text(&mut buf, &prior).unwrap();
    // Truncate before the closing token.
    let close_pos = buf.windows(19).position(|w| w == b"</OnlineNoisePrior>").unwrap();
    buf.truncate(close_pos);

    let mut cursor = Cursor::new(buf);
    assert!(read_text(&mut cursor).is_err());
}
