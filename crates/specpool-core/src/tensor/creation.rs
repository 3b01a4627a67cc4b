//! Tensor Creation and Construction

use super::core::Tensor;
use crate::{Result, Shape, TensorError};
use ndarray::{Array4, ArrayD, IxDyn};
use num_traits::Zero;

impl<T: Clone> Tensor<T> {
    /// Create a tensor filled with zeros
    pub fn zeros(shape: &[usize]) -> Self
    where
        T: Zero,
    {
        Self {
            data: ArrayD::zeros(IxDyn(shape)),
            shape: Shape::from_slice(shape),
        }
    }

    /// Create a tensor from a row-major data vector with the given shape
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let total_elements: usize = shape.iter().product();
        if data.len() != total_elements {
            return Err(TensorError::invalid_shape(
                "from_vec",
                &format!(
                    "data length {} does not match shape {:?} (expected {} elements)",
                    data.len(),
                    shape,
                    total_elements
                ),
                shape,
            ));
        }

        let array = ArrayD::from_shape_vec(IxDyn(shape), data)?;
        Ok(Self::from_array(array))
    }

    /// Create a tensor from an existing ndarray, copying into row-major order if needed
    pub fn from_array(array: ArrayD<T>) -> Self {
        let data = if array.is_standard_layout() {
            array
        } else {
            array.as_standard_layout().into_owned()
        };
        let shape = Shape::from_slice(data.shape());
        Self { data, shape }
    }

    /// Build an NCHW tensor from a function of `(batch, channel, row, col)`
    pub fn from_fn4<F>(dims: (usize, usize, usize, usize), f: F) -> Self
    where
        F: Fn(usize, usize, usize, usize) -> T,
    {
        let array = Array4::from_shape_fn(dims, |(b, c, h, w)| f(b, c, h, w));
        Self::from_array(array.into_dyn())
    }
}
