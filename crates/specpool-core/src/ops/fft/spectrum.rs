//! Elementwise helpers for complex spectra

use crate::{Result, Shape, Tensor, TensorError};
use ndarray::Zip;
use num_traits::Float;
use rustfft::num_complex::Complex;

/// `|z|` for every coefficient
pub fn magnitude<T: Float>(spectrum: &Tensor<Complex<T>>) -> Tensor<T> {
    spectrum.map(|z| z.norm())
}

/// `arg(z)` in `(-pi, pi]` for every coefficient
pub fn phase<T: Float>(spectrum: &Tensor<Complex<T>>) -> Tensor<T> {
    spectrum.map(|z| z.arg())
}

/// Real component of every coefficient
pub fn real_part<T: Float>(spectrum: &Tensor<Complex<T>>) -> Tensor<T> {
    spectrum.map(|z| z.re)
}

/// Recombine `magnitude * exp(i * phase)`
pub fn from_polar<T: Float>(magnitude: &Tensor<T>, phase: &Tensor<T>) -> Result<Tensor<Complex<T>>> {
    if !magnitude.same_shape(phase) {
        return Err(TensorError::shape_mismatch(
            "from_polar",
            &magnitude.shape().to_string(),
            &phase.shape().to_string(),
        ));
    }
    let combined = Zip::from(magnitude.array())
        .and(phase.array())
        .map_collect(|&r, &theta| Complex::from_polar(r, theta));
    Ok(Tensor::from_array(combined))
}

/// Check that a `(1|B, 1|C, H, W)` mask can be applied to a `(B, C, H, W)` spectrum.
pub fn check_mask_shape(operation: &str, target: &Shape, mask: &Shape) -> Result<()> {
    let (batch, channels, height, width) = target.image_dims(operation)?;
    mask.ensure_image_batch(operation)?;

    let expected = format!("mask of shape [1|{batch}, 1|{channels}, {height}, {width}]");
    let batch_ok = mask.batch() == 1 || mask.batch() == batch;
    let channels_ok = mask.channels() == 1 || mask.channels() == channels;
    if !batch_ok || !channels_ok || mask.height() != height || mask.width() != width {
        return Err(TensorError::shape_mismatch(
            operation,
            &expected,
            &mask.to_string(),
        ));
    }
    Ok(())
}

/// Scale each coefficient's magnitude by the mask while keeping its phase.
pub fn apply_magnitude_mask<T: Float>(
    spectrum: &Tensor<Complex<T>>,
    mask: &Tensor<T>,
) -> Result<Tensor<Complex<T>>> {
    check_mask_shape("apply_magnitude_mask", spectrum.shape(), mask.shape())?;

    let dims = spectrum.shape().dims();
    let mask_view = mask.array().broadcast(dims).ok_or_else(|| {
        TensorError::shape_mismatch(
            "apply_magnitude_mask",
            &spectrum.shape().to_string(),
            &mask.shape().to_string(),
        )
    })?;

    let masked = Zip::from(spectrum.array())
        .and(&mask_view)
        .map_collect(|z, &m| Complex::from_polar(z.norm() * m, z.arg()));
    Ok(Tensor::from_array(masked))
}
