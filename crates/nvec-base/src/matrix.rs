use crate::error::LinalgError;
use crate::vector::Vector;

/// A dense real matrix, stored row-major as a flat `f64` buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(nrows * ncols);
        for r in &rows {
            debug_assert_eq!(r.len(), ncols);
            data.extend_from_slice(r);
        }
        Self { rows: nrows, cols: ncols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, v: f64) {
        self.data[r * self.cols + c] = v;
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn row_vector(&self, r: usize) -> Vector {
        Vector::from_slice(self.row(r))
    }

    pub fn set_row(&mut self, r: usize, values: &Vector) {
        debug_assert_eq!(values.dim(), self.cols);
        self.data[r * self.cols..(r + 1) * self.cols].copy_from_slice(values.as_slice());
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copies out the `nrows x ncols` block starting at `(r0, c0)`.
    pub fn block(&self, r0: usize, nrows: usize, c0: usize, ncols: usize) -> Result<Matrix, LinalgError> {
        if r0 + nrows > self.rows || c0 + ncols > self.cols {
            return Err(LinalgError::ShapeMismatch {
                expected: format!("block ({r0}+{nrows}, {c0}+{ncols}) within ({}, {})", self.rows, self.cols),
                got: format!("({}, {})", self.rows, self.cols),
            });
        }
        let mut out = Matrix::zeros(nrows, ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                out.set(i, j, self.get(r0 + i, c0 + j));
            }
        }
        Ok(out)
    }

    /// Writes `block` into `self` at `(r0, c0)`, overwriting.
    pub fn set_block(&mut self, r0: usize, c0: usize, block: &Matrix) -> Result<(), LinalgError> {
        if r0 + block.rows > self.rows || c0 + block.cols > self.cols {
            return Err(LinalgError::ShapeMismatch {
                expected: format!("block ({r0}+{}, {c0}+{}) within ({}, {})", block.rows, block.cols, self.rows, self.cols),
                got: format!("({}, {})", self.rows, self.cols),
            });
        }
        for i in 0..block.rows {
            for j in 0..block.cols {
                self.set(r0 + i, c0 + j, block.get(i, j));
            }
        }
        Ok(())
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(j, i, self.get(i, j));
            }
        }
        out
    }

    pub fn scale(&mut self, alpha: f64) {
        for v in self.data.iter_mut() {
            *v *= alpha;
        }
    }

    /// `self += alpha * other`, elementwise.
    pub fn add_scaled(&mut self, alpha: f64, other: &Matrix) {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        for (s, o) in self.data.iter_mut().zip(other.data.iter()) {
            *s += alpha * o;
        }
    }

    /// `self += alpha * v * v^T` (rank-1 update, mirrors `AddVecVec`).
    pub fn add_outer(&mut self, alpha: f64, v: &Vector) {
        debug_assert_eq!(self.rows, v.dim());
        debug_assert_eq!(self.cols, v.dim());
        for i in 0..self.rows {
            for j in 0..self.cols {
                let delta = alpha * v[i] * v[j];
                let idx = i * self.cols + j;
                self.data[idx] += delta;
            }
        }
    }

    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        if self.cols != other.rows {
            return Err(LinalgError::ShapeMismatch {
                expected: format!("{} == {}", self.cols, other.rows),
                got: format!("{} vs {}", self.cols, other.rows),
            });
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a_ik = self.get(i, k);
                if a_ik == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    let idx = i * out.cols + j;
                    out.data[idx] += a_ik * other.get(k, j);
                }
            }
        }
        Ok(out)
    }

    pub fn matvec(&self, v: &Vector) -> Result<Vector, LinalgError> {
        if self.cols != v.dim() {
            return Err(LinalgError::ShapeMismatch {
                expected: format!("{}", self.cols),
                got: format!("{}", v.dim()),
            });
        }
        let mut out = Vector::zeros(self.rows);
        for i in 0..self.rows {
            let mut acc = 0.0;
            for j in 0..self.cols {
                acc += self.get(i, j) * v[j];
            }
            out[i] = acc;
        }
        Ok(out)
    }

    /// `tr(self^T_ij * other_ij)`-style trace of the matrix product, i.e. `tr(self * other)`
    /// computed as `sum_{i,j} self[i,j] * other[j,i]`; for symmetric `self`/`other` this
    /// reduces to the elementwise-product sum used in the scaling-parameter update.
    pub fn trace_mat_mat(&self, other: &Matrix) -> Result<f64, LinalgError> {
        if self.rows != other.cols || self.cols != other.rows {
            return Err(LinalgError::ShapeMismatch {
                expected: format!("({}, {})", other.cols, other.rows),
                got: format!("({}, {})", self.rows, self.cols),
            });
        }
        let mut acc = 0.0;
        for i in 0..self.rows {
            for j in 0..self.cols {
                acc += self.get(i, j) * other.get(j, i);
            }
        }
        Ok(acc)
    }

    /// General matrix inverse via Gauss-Jordan elimination with partial pivoting.
    pub fn invert(&self) -> Result<Matrix, LinalgError> {
        if self.rows != self.cols {
            return Err(LinalgError::ShapeMismatch {
                expected: "square matrix".to_string(),
                got: format!("({}, {})", self.rows, self.cols),
            });
        }
        let n = self.rows;
        let mut a = self.data.clone();
        let mut inv = Matrix::identity(n).data;

        for col in 0..n {
            // Partial pivot.
            let mut pivot_row = col;
            let mut pivot_val = a[col * n + col].abs();
            for r in (col + 1)..n {
                let val = a[r * n + col].abs();
                if val > pivot_val {
                    pivot_val = val;
                    pivot_row = r;
                }
            }
            if pivot_val < 1e-12 {
                return Err(LinalgError::IllConditioned);
            }
            if pivot_row != col {
                for c in 0..n {
                    a.swap(col * n + c, pivot_row * n + c);
                    inv.swap(col * n + c, pivot_row * n + c);
                }
            }

            let pivot = a[col * n + col];
            for c in 0..n {
                a[col * n + c] /= pivot;
                inv[col * n + c] /= pivot;
            }

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = a[r * n + col];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..n {
                    a[r * n + c] -= factor * a[col * n + c];
                    inv[r * n + c] -= factor * inv[col * n + c];
                }
            }
        }

        Ok(Matrix { rows: n, cols: n, data: inv })
    }

    /// Lower-triangular Cholesky factor `L` such that `self == L L^T`.
    /// `self` must be symmetric positive-definite; fails with `IllConditioned`
    /// if a diagonal pivot is not (sufficiently) positive.
    pub fn cholesky(&self) -> Result<Matrix, LinalgError> {
        if self.rows != self.cols {
            return Err(LinalgError::ShapeMismatch {
                expected: "square matrix".to_string(),
                got: format!("({}, {})", self.rows, self.cols),
            });
        }
        let n = self.rows;
        let mut l = Matrix::zeros(n, n);
        for i in 0..n {
            for j in 0..=i {
                let mut sum = self.get(i, j);
                for k in 0..j {
                    sum -= l.get(i, k) * l.get(j, k);
                }
                if i == j {
                    if sum < 1e-12 {
                        return Err(LinalgError::IllConditioned);
                    }
                    l.set(i, j, sum.sqrt());
                } else {
                    let diag = l.get(j, j);
                    if diag.abs() < 1e-12 {
                        return Err(LinalgError::IllConditioned);
                    }
                    l.set(i, j, sum / diag);
                }
            }
        }
        Ok(l)
    }

    /// Solves `self * x = rhs` for symmetric positive-definite `self` via Cholesky.
    pub fn cholesky_solve(&self, rhs: &Vector) -> Result<Vector, LinalgError> {
        let l = self.cholesky()?;
        let n = l.rows;
        debug_assert_eq!(rhs.dim(), n);

        // Forward substitution: L y = rhs.
        let mut y = Vector::zeros(n);
        for i in 0..n {
            let mut sum = rhs[i];
            for k in 0..i {
                sum -= l.get(i, k) * y[k];
            }
            y[i] = sum / l.get(i, i);
        }

        // Back substitution: L^T x = y.
        let mut x = Vector::zeros(n);
        for i in (0..n).rev() {
            let mut sum = y[i];
            for k in (i + 1)..n {
                sum -= l.get(k, i) * x[k];
            }
            x[i] = sum / l.get(i, i);
        }

        Ok(x)
    }
}
