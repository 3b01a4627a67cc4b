//! Spectrum centering
//!
//! `fftshift` rotates the two spatial axes of an NCHW tensor so the DC
//! coefficient moves from `(0, 0)` to `(n/2, n/2)`; `ifftshift` undoes it.
//! Both work on real masks and complex spectra alike.

use crate::{Result, Tensor, TensorError};
use ndarray::{concatenate, Axis, Slice};

/// Spatial axis of an NCHW tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialAxis {
    Height,
    Width,
}

impl SpatialAxis {
    /// Position of this axis in an NCHW tensor
    pub fn index(self) -> usize {
        match self {
            SpatialAxis::Height => 2,
            SpatialAxis::Width => 3,
        }
    }
}

/// Split point used to rotate an axis of length `n`.
///
/// Forward shifts split at `ceil(n / 2)`, so for an odd axis the extra
/// element ends up in the second half of the output (`n = 5` gives
/// `[3, 4, 0, 1, 2]`); the inverse splits at `n - ceil(n / 2)`.
pub fn shift_midpoint(n: usize, invert: bool) -> usize {
    let mid = (n + 1) / 2;
    if invert {
        n - mid
    } else {
        mid
    }
}

/// Rotate one spatial axis: output is `[mid..n] ++ [0..mid]` along `axis`.
pub fn shift_axis<T: Clone>(
    tensor: &Tensor<T>,
    n: usize,
    axis: SpatialAxis,
    invert: bool,
) -> Result<Tensor<T>> {
    let operation = if invert { "ifftshift" } else { "fftshift" };
    let shape = tensor.shape();
    shape.ensure_image_batch(operation)?;

    let ax = axis.index();
    if shape[ax] != n {
        return Err(TensorError::shape_mismatch(
            operation,
            &format!("axis {ax} of length {n}"),
            &format!("length {}", shape[ax]),
        ));
    }

    let mid = shift_midpoint(n, invert);
    let array = tensor.array();
    let rotated = concatenate(
        Axis(ax),
        &[
            array.slice_axis(Axis(ax), Slice::from(mid..)),
            array.slice_axis(Axis(ax), Slice::from(..mid)),
        ],
    )?;
    Ok(Tensor::from_array(rotated))
}

/// Move the DC coefficient of each `n x n` plane to the centre
pub fn fftshift<T: Clone>(tensor: &Tensor<T>, n: usize) -> Result<Tensor<T>> {
    shift_both(tensor, n, false)
}

/// Move the DC coefficient of each `n x n` plane back to the corner
pub fn ifftshift<T: Clone>(tensor: &Tensor<T>, n: usize) -> Result<Tensor<T>> {
    shift_both(tensor, n, true)
}

fn shift_both<T: Clone>(tensor: &Tensor<T>, n: usize, invert: bool) -> Result<Tensor<T>> {
    let operation = if invert { "ifftshift" } else { "fftshift" };
    tensor.shape().ensure_square(operation)?;
    let shifted = shift_axis(tensor, n, SpatialAxis::Width, invert)?;
    shift_axis(&shifted, n, SpatialAxis::Height, invert)
}
