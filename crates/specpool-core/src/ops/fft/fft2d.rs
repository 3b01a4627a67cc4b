//! 2D Fast Fourier Transform operations
//!
//! Forward and inverse transforms over the two trailing axes of a tensor.
//! Every leading index (batch, channel, ...) selects an independent 2D slice;
//! slices are transformed in parallel with one shared rustfft plan per axis.

use crate::{Result, Tensor, TensorError};
use ndarray::{ArrayD, IxDyn};
use num_traits::Float;
use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftDirection, FftNum, FftPlanner};
use tracing::debug_span;

/// 2D FFT along the last two axes
pub fn fft2<T>(input: &Tensor<T>) -> Result<Tensor<Complex<T>>>
where
    T: Float + FftNum,
{
    let _span = debug_span!("fft2", shape = %input.shape()).entered();
    let buffer: Vec<Complex<T>> = input
        .array()
        .iter()
        .map(|&x| Complex::new(x, T::zero()))
        .collect();
    transform_2d("fft2", buffer, input.shape().dims(), FftDirection::Forward)
}

/// 2D inverse FFT along the last two axes, scaled by `1 / (height * width)`
pub fn ifft2<T>(input: &Tensor<Complex<T>>) -> Result<Tensor<Complex<T>>>
where
    T: Float + FftNum,
{
    let _span = debug_span!("ifft2", shape = %input.shape()).entered();
    let buffer = input.to_vec();
    transform_2d("ifft2", buffer, input.shape().dims(), FftDirection::Inverse)
}

fn transform_2d<T>(
    operation: &str,
    mut data: Vec<Complex<T>>,
    shape: &[usize],
    direction: FftDirection,
) -> Result<Tensor<Complex<T>>>
where
    T: Float + FftNum,
{
    let ndim = shape.len();
    if ndim < 2 {
        return Err(TensorError::invalid_shape(
            operation,
            "2D FFT requires at least 2D input",
            shape,
        ));
    }

    let height = shape[ndim - 2];
    let width = shape[ndim - 1];
    let elements_per_slice = height * width;

    if elements_per_slice > 0 {
        let mut planner = FftPlanner::new();
        let fft_width = planner.plan_fft(width, direction);
        let fft_height = planner.plan_fft(height, direction);

        let scale = match direction {
            FftDirection::Forward => None,
            FftDirection::Inverse => {
                let count = T::from_usize(elements_per_slice).ok_or_else(|| {
                    TensorError::numerical_error(
                        operation,
                        "slice size is not representable in the element type",
                        vec![],
                    )
                })?;
                Some(count.recip())
            }
        };

        data.par_chunks_mut(elements_per_slice).for_each(|slice| {
            // Rows are contiguous, so one call transforms all of them.
            fft_width.process(slice);

            let mut column = vec![Complex::new(T::zero(), T::zero()); height];
            for col in 0..width {
                for (row, value) in column.iter_mut().enumerate() {
                    *value = slice[row * width + col];
                }
                fft_height.process(&mut column);
                for (row, value) in column.iter().enumerate() {
                    slice[row * width + col] = *value;
                }
            }

            if let Some(scale) = scale {
                for value in slice.iter_mut() {
                    *value = value.scale(scale);
                }
            }
        });
    }

    let output_array = ArrayD::from_shape_vec(IxDyn(shape), data)?;
    Ok(Tensor::from_array(output_array))
}
