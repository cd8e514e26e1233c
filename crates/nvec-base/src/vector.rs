use crate::error::LinalgError;
use std::ops::{Index, IndexMut};

/// A dense real vector, stored as a flat `f64` buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn zeros(dim: usize) -> Self {
        Self { data: vec![0.0; dim] }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn from_slice(data: &[f64]) -> Self {
        Self { data: data.to_vec() }
    }

    pub fn dim(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Returns the contiguous sub-vector `self[offset..offset+len]`, copied.
    pub fn sub_vector(&self, offset: usize, len: usize) -> Result<Vector, LinalgError> {
        if offset + len > self.dim() {
            return Err(LinalgError::ShapeMismatch {
                expected: format!("offset {offset} + len {len} <= dim {}", self.dim()),
                got: format!("dim {}", self.dim()),
            });
        }
        Ok(Vector::from_slice(&self.data[offset..offset + len]))
    }

    /// Overwrites `self[offset..offset+other.dim()]` with `other`.
    pub fn set_sub_vector(&mut self, offset: usize, other: &Vector) -> Result<(), LinalgError> {
        if offset + other.dim() > self.dim() {
            return Err(LinalgError::ShapeMismatch {
                expected: format!("offset {offset} + len {} <= dim {}", other.dim(), self.dim()),
                got: format!("dim {}", self.dim()),
            });
        }
        self.data[offset..offset + other.dim()].copy_from_slice(&other.data);
        Ok(())
    }

    /// `self += alpha * other` (axpy).
    pub fn add_scaled(&mut self, alpha: f64, other: &Vector) {
        debug_assert_eq!(self.dim(), other.dim());
        for (s, o) in self.data.iter_mut().zip(other.data.iter()) {
            *s += alpha * o;
        }
    }

    pub fn scale(&mut self, alpha: f64) {
        for v in self.data.iter_mut() {
            *v *= alpha;
        }
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());
        self.data.iter().zip(other.data.iter()).map(|(a, b)| a * b).sum()
    }

    /// `self - other`, elementwise, returned as a new vector.
    pub fn sub(&self, other: &Vector) -> Vector {
        debug_assert_eq!(self.dim(), other.dim());
        let data = self.data.iter().zip(other.data.iter()).map(|(a, b)| a - b).collect();
        Vector { data }
    }

    /// Concatenates `self` and `other` into a new vector of dimension `self.dim() + other.dim()`.
    pub fn concat(&self, other: &Vector) -> Vector {
        let mut data = Vec::with_capacity(self.dim() + other.dim());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Vector { data }
    }
}

impl Index<usize> for Vector {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.data[i]
    }
}
