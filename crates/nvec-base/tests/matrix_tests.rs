use nvec_base::{LinalgError, Matrix, Vector};

#[test]
fn identity_matvec_is_identity() {
    let id = Matrix::identity(3);
    let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let out = id.matvec(&v).unwrap();
    assert_eq!(out.as_slice(), v.as_slice());
}

#[test]
fn matmul_basic() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.row(0), &[19.0, 22.0]);
    assert_eq!(c.row(1), &[43.0, 50.0]);
}

#[test]
fn invert_identity_is_identity() {
    let id = Matrix::identity(4);
    let inv = id.invert().unwrap();
    for i in 0..4 {
        for j in 0..4 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((inv.get(i, j) - expected).abs() < 1e-10);
        }
    }
}

#[test]
fn invert_then_matmul_gives_identity() {
    let a = Matrix::from_rows(vec![vec![4.0, 7.0], vec![2.0, 6.0]]);
    let inv = a.invert().unwrap();
    let prod = a.matmul(&inv).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((prod.get(i, j) - expected).abs() < 1e-9);
        }
    }
}

#[test]
fn invert_singular_matrix_is_ill_conditioned() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
    assert_eq!(a.invert().unwrap_err(), LinalgError::IllConditioned);
}

#[test]
fn block_extraction() {
    let m = Matrix::from_rows(vec![
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![7.0, 8.0, 9.0],
    ]);
    let b = m.block(1, 2, 1, 2).unwrap();
    assert_eq!(b.row(0), &[5.0, 6.0]);
    assert_eq!(b.row(1), &[8.0, 9.0]);
}

#[test]
fn add_outer_accumulates_rank_one_update() {
    let mut m = Matrix::zeros(2, 2);
    let v = Vector::from_slice(&[1.0, 2.0]);
    m.add_outer(1.0, &v);
    assert_eq!(m.row(0), &[1.0, 2.0]);
    assert_eq!(m.row(1), &[2.0, 4.0]);
}

#[test]
fn trace_mat_mat_of_identity_is_dimension() {
    let id = Matrix::identity(3);
    let tr = id.trace_mat_mat(&id).unwrap();
    assert!((tr - 3.0).abs() < 1e-12);
}

#[test]
fn cholesky_solve_matches_direct_inverse() {
    // Symmetric positive-definite matrix.
    let a = Matrix::from_rows(vec![vec![4.0, 1.0], vec![1.0, 3.0]]);
    let rhs = Vector::from_slice(&[1.0, 2.0]);
    let x = a.cholesky_solve(&rhs).unwrap();

    let inv = a.invert().unwrap();
    let expected = inv.matvec(&rhs).unwrap();
    for i in 0..2 {
        assert!((x[i] - expected[i]).abs() < 1e-9);
    }
}

#[test]
fn cholesky_rejects_non_positive_definite() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 1.0]]);
    assert!(a.cholesky().is_err());
}

#[test]
fn transpose_round_trip() {
    let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    let t = m.transpose();
    assert_eq!(t.rows(), 3);
    assert_eq!(t.cols(), 2);
    assert_eq!(t.get(2, 1), 6.0);
}
