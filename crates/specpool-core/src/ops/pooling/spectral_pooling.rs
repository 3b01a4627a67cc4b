//! Spectral pooling
//!
//! Downsamples image content by discarding high frequencies instead of
//! aggregating spatial neighbourhoods:
//!
//! 1. 2D FFT of every `(batch, channel)` plane
//! 2. centre the spectrum (`fftshift`) when the mask is centre-origin
//! 3. scale the magnitude by a low-pass mask, keeping the phase
//! 4. undo the centring, inverse FFT, keep the real part
//! 5. min-max rescale to `[0, 1]`
//!
//! The call is stateless: nothing is cached between invocations.

use crate::config::{MaskLayout, MaskSpec, SpectralPoolConfig};
use crate::ops::fft::{
    apply_magnitude_mask, check_mask_shape, fft2, fftshift, ifft2, ifftshift, low_pass_filter,
    real_part, retained_fraction,
};
use crate::ops::normalization::min_max_normalize;
use crate::{Result, Tensor, TensorError};
use num_traits::{Float, NumCast};
use rustfft::num_complex::Complex;
use rustfft::FftNum;
use tracing::{debug, debug_span, warn};

/// Result of a spectral pool call
#[derive(Debug, Clone)]
pub struct SpectralPoolOutput<T> {
    /// Forward FFT of the input, DC at `(0, 0)`, before masking
    pub spectrum: Tensor<Complex<T>>,
    /// Pooled image batch rescaled to `[0, 1]`, same shape as the input
    pub pooled: Tensor<T>,
}

impl<T> SpectralPoolOutput<T> {
    /// Drop the spectrum and keep the pooled images
    pub fn into_pooled(self) -> Tensor<T> {
        self.pooled
    }

    /// Split into `(spectrum, pooled)`
    pub fn into_parts(self) -> (Tensor<Complex<T>>, Tensor<T>) {
        (self.spectrum, self.pooled)
    }
}

/// Spectral pool with the default configuration and the given retained block size
pub fn spectral_pool<T>(image: &Tensor<T>, pool_size: usize) -> Result<SpectralPoolOutput<T>>
where
    T: Float + FftNum,
{
    spectral_pool_with_config(image, &SpectralPoolConfig::new(pool_size))
}

/// Spectral pool an NCHW batch of square images.
///
/// Fails with `ShapeMismatch` for non-square images or a mask that does not
/// fit the batch, and with `NumericalError` when the pooled result is constant
/// within a normalisation group.
pub fn spectral_pool_with_config<T>(
    image: &Tensor<T>,
    config: &SpectralPoolConfig,
) -> Result<SpectralPoolOutput<T>>
where
    T: Float + FftNum,
{
    let _span = debug_span!(
        "spectral_pool",
        shape = %image.shape(),
        pool_size = config.pool_size
    )
    .entered();

    config.validate()?;
    let n = image.shape().ensure_square("spectral_pool").map_err(|err| {
        warn!(shape = %image.shape(), "spectral_pool rejected input shape");
        err
    })?;

    let mask = match &config.mask {
        Some(spec) => mask_from_spec(spec)?,
        None => low_pass_filter(image.shape(), config.pool_size, config.mask_layout)?,
    };
    check_mask_shape("spectral_pool", image.shape(), mask.shape())?;
    debug!(
        retained = retained_fraction(&mask),
        layout = ?config.mask_layout,
        "low-pass mask ready"
    );

    let spectrum = fft2(image)?;
    let masked = match config.mask_layout {
        MaskLayout::Centered => {
            let centered = fftshift(&spectrum, n)?;
            let filtered = apply_magnitude_mask(&centered, &mask)?;
            ifftshift(&filtered, n)?
        }
        MaskLayout::Corner => apply_magnitude_mask(&spectrum, &mask)?,
    };

    let restored = real_part(&ifft2(&masked)?);
    let pooled = min_max_normalize(&restored, config.normalization)?;

    Ok(SpectralPoolOutput { spectrum, pooled })
}

fn mask_from_spec<T: Float>(spec: &MaskSpec) -> Result<Tensor<T>> {
    let values = spec
        .values
        .iter()
        .map(|&v| {
            <T as NumCast>::from(v).ok_or_else(|| {
                TensorError::numerical_error(
                    "spectral_pool",
                    &format!("mask value {v} is not representable in the element type"),
                    vec![],
                )
            })
        })
        .collect::<Result<Vec<T>>>()?;
    Tensor::from_vec(values, &spec.dims)
}

/// Reusable spectral pooling operator
///
/// Holds only its configuration, so one instance can be shared across
/// threads and applied to any number of batches.
#[derive(Debug, Clone, Default)]
pub struct SpectralPool {
    config: SpectralPoolConfig,
}

impl SpectralPool {
    /// Validate `config` and build the operator
    pub fn new(config: SpectralPoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration applied by [`SpectralPool::forward`]
    pub fn config(&self) -> &SpectralPoolConfig {
        &self.config
    }

    pub fn forward<T>(&self, image: &Tensor<T>) -> Result<SpectralPoolOutput<T>>
    where
        T: Float + FftNum,
    {
        spectral_pool_with_config(image, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizationScope;
    use approx::assert_abs_diff_eq;

    fn gradient_image(n: usize) -> Tensor<f64> {
        Tensor::from_fn4((2, 3, n, n), |b, c, h, w| {
            ((h * 31 + w * 17 + c * 7 + b * 3) % 23) as f64
        })
    }

    #[test]
    fn test_full_pool_reconstructs_normalized_input() {
        let image = gradient_image(8);
        let output = spectral_pool(&image, 8).unwrap();
        let expected = min_max_normalize(&image, NormalizationScope::PerChannel).unwrap();
        for (got, want) in output.pooled.array().iter().zip(expected.array().iter()) {
            assert_abs_diff_eq!(*got, *want, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_output_in_unit_range() {
        let image = gradient_image(9);
        for pool_size in 2..=9 {
            let pooled = spectral_pool(&image, pool_size).unwrap().into_pooled();
            assert_eq!(pooled.shape(), image.shape());
            for &v in pooled.array().iter() {
                assert!((-1e-12..=1.0 + 1e-12).contains(&v), "value {v} out of range");
            }
        }
    }

    #[test]
    fn test_spectrum_is_raw_fft() {
        let image = gradient_image(4);
        let output = spectral_pool(&image, 2).unwrap();
        assert_eq!(output.spectrum, fft2(&image).unwrap());
    }

    #[test]
    fn test_layouts_agree() {
        let image = gradient_image(7);
        for pool_size in [2, 3, 5] {
            let centered = spectral_pool_with_config(
                &image,
                &SpectralPoolConfig::new(pool_size).with_mask_layout(MaskLayout::Centered),
            )
            .unwrap();
            let corner = spectral_pool_with_config(
                &image,
                &SpectralPoolConfig::new(pool_size).with_mask_layout(MaskLayout::Corner),
            )
            .unwrap();
            for (a, b) in centered.pooled.array().iter().zip(corner.pooled.array().iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_dc_only_flattens_image() {
        let image = gradient_image(4);
        let config = SpectralPoolConfig::new(1).with_normalization(NormalizationScope::PerImage);
        let err = spectral_pool_with_config(&image, &config).unwrap_err();
        assert!(err.is_numerical());
    }

    #[test]
    fn test_constant_image_is_numerical_error() {
        for n in [3, 4, 5, 6, 7, 9, 10, 12] {
            let image = Tensor::from_fn4((2, 2, n, n), |_, c, _, _| 0.3 + c as f64);
            for pool_size in [1, 2, n] {
                let result = spectral_pool(&image, pool_size);
                assert!(
                    matches!(&result, Err(err) if err.is_numerical()),
                    "n={n} pool_size={pool_size} gave {result:?}"
                );
            }
        }
    }

    #[test]
    fn test_constant_image_f32() {
        for n in [5, 7, 11] {
            let image = Tensor::from_fn4((1, 1, n, n), |_, _, _, _| 0.7f32);
            assert!(spectral_pool(&image, n).unwrap_err().is_numerical());
        }
    }

    #[test]
    fn test_into_parts() {
        let image = gradient_image(5);
        let output = spectral_pool(&image, 3).unwrap();
        let pooled = output.pooled.clone();
        let (spectrum, parts_pooled) = output.into_parts();
        assert_eq!(spectrum, fft2(&image).unwrap());
        assert_eq!(parts_pooled, pooled);
    }

    #[test]
    fn test_non_square_rejected() {
        let image = Tensor::<f32>::zeros(&[1, 1, 4, 6]);
        assert!(matches!(
            spectral_pool(&image, 2),
            Err(TensorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_mask_batch_mismatch_rejected() {
        let image = gradient_image(4);
        let config = SpectralPoolConfig::new(2).with_mask(MaskSpec {
            dims: vec![3, 1, 4, 4],
            values: vec![1.0; 48],
        });
        assert!(matches!(
            spectral_pool_with_config(&image, &config),
            Err(TensorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_supplied_mask_matches_generated() {
        let image = gradient_image(6);
        let generated =
            low_pass_filter::<f64>(image.shape(), 4, MaskLayout::Centered).unwrap();
        let config = SpectralPoolConfig::new(4).with_mask(MaskSpec {
            dims: generated.shape().to_vec(),
            values: generated.to_vec(),
        });
        let supplied = spectral_pool_with_config(&image, &config).unwrap();
        let default = spectral_pool(&image, 4).unwrap();
        assert_eq!(supplied.pooled, default.pooled);
    }

    #[test]
    fn test_operator_matches_function() {
        let pool = SpectralPool::new(
            SpectralPoolConfig::new(3).with_normalization(NormalizationScope::PerImage),
        )
        .unwrap();
        let image = gradient_image(6);
        let via_operator = pool.forward(&image).unwrap();
        let via_function = spectral_pool_with_config(&image, pool.config()).unwrap();
        assert_eq!(via_operator.pooled, via_function.pooled);
        assert!(SpectralPool::new(SpectralPoolConfig::new(0)).is_err());
    }
}
