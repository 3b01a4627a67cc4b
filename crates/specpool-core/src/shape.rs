#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::{Result, TensorError};

/// Tensor dimensions. Image batches use the NCHW order
/// `(batch, channels, height, width)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn from_slice(dims: &[usize]) -> Self {
        Self {
            dims: dims.to_vec(),
        }
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.dims.clone()
    }

    /// Batch size of an NCHW shape
    pub fn batch(&self) -> usize {
        self.dims[0]
    }

    /// Channel count of an NCHW shape
    pub fn channels(&self) -> usize {
        self.dims[1]
    }

    pub fn height(&self) -> usize {
        self.dims[2]
    }

    pub fn width(&self) -> usize {
        self.dims[3]
    }

    /// `(batch, channels, height, width)` after checking the rank.
    pub fn image_dims(&self, operation: &str) -> Result<(usize, usize, usize, usize)> {
        self.ensure_image_batch(operation)?;
        Ok((self.dims[0], self.dims[1], self.dims[2], self.dims[3]))
    }

    /// Fail unless this is a rank-4 NCHW shape.
    pub fn ensure_image_batch(&self, operation: &str) -> Result<()> {
        if self.rank() != 4 {
            return Err(TensorError::invalid_shape(
                operation,
                &format!(
                    "expected a 4D (batch, channel, height, width) tensor, got {}D",
                    self.rank()
                ),
                &self.dims,
            ));
        }
        Ok(())
    }

    /// Fail unless this is a rank-4 shape with `height == width`.
    pub fn ensure_square(&self, operation: &str) -> Result<usize> {
        self.ensure_image_batch(operation)?;
        if self.height() != self.width() {
            return Err(TensorError::shape_mismatch(
                operation,
                &format!("square spatial dims (height == width), height {}", self.height()),
                &format!("width {}", self.width()),
            ));
        }
        Ok(self.height())
    }

    /// Number of elements in one flattened sample (everything after the batch axis).
    pub fn sample_size(&self) -> usize {
        self.dims.iter().skip(1).product()
    }
}

impl Index<usize> for Shape {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.dims[index]
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dim}")?;
        }
        write!(f, "]")
    }
}
