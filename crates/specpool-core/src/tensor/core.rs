//! Core Tensor Structure and Properties
//!
//! A tensor owns its elements in a row-major `ndarray::ArrayD` and carries
//! no device, gradient or graph bookkeeping. Every operation in this crate
//! takes tensors by reference and returns fresh ones.

use crate::Shape;
use ndarray::ArrayD;
use num_traits::Float;

/// Dense, row-major CPU tensor
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    pub(in crate::tensor) data: ArrayD<T>,
    pub(in crate::tensor) shape: Shape,
}

impl<T> Tensor<T> {
    /// Get the shape of the tensor
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Borrow the backing array
    pub fn array(&self) -> &ArrayD<T> {
        &self.data
    }

    /// Get the value at a specific index
    pub fn get(&self, index: &[usize]) -> Option<T>
    where
        T: Clone,
    {
        if index.len() != self.data.ndim() {
            return None;
        }
        self.data.get(index).cloned()
    }

    /// Get the underlying data as a row-major slice
    pub fn as_slice(&self) -> Option<&[T]> {
        self.data.as_slice()
    }

    /// Copy the elements out in row-major order
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.size() == 0
    }

    /// Get the total number of elements
    pub fn numel(&self) -> usize {
        self.shape.size()
    }

    /// Get the number of dimensions
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Check if two tensors have the same shape
    pub fn same_shape<U>(&self, other: &Tensor<U>) -> bool {
        self.shape == other.shape
    }

    /// Apply `f` to every element, keeping the shape
    pub fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        F: Fn(&T) -> U,
    {
        Tensor {
            data: self.data.map(f),
            shape: self.shape.clone(),
        }
    }
}

impl<T: Float> Tensor<T> {
    /// Largest element, ignoring NaN; `None` for an empty tensor
    pub fn max_value(&self) -> Option<T> {
        self.data
            .iter()
            .copied()
            .fold(None, |acc, x| match acc {
                None => Some(x),
                Some(m) => Some(m.max(x)),
            })
    }

    /// Smallest element, ignoring NaN; `None` for an empty tensor
    pub fn min_value(&self) -> Option<T> {
        self.data
            .iter()
            .copied()
            .fold(None, |acc, x| match acc {
                None => Some(x),
                Some(m) => Some(m.min(x)),
            })
    }
}
