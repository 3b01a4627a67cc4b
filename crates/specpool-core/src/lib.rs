//! Spectral pooling on dense NCHW image batches
//!
//! - **tensor** / **shape**: CPU tensors backed by `ndarray`
//! - **ops::fft**: 2D transforms, `fftshift`/`ifftshift` and low-pass masks
//! - **ops::pooling**: spectral pooling, the max pooling baseline and their comparison
//! - **ops::metrics**: relative L2 error between image batches
//! - **config**: operator configuration (serde behind the `serialize` feature)
//!
//! ```rust,no_run
//! use specpool_core::{spectral_pool, max_pool, l2_relative_error, Tensor};
//!
//! # fn main() -> specpool_core::Result<()> {
//! let images = Tensor::<f64>::from_fn4((4, 3, 32, 32), |_, c, h, w| ((h * w + c) % 17) as f64);
//! let spectral = spectral_pool(&images, 8)?.into_pooled();
//! let maxed = max_pool(&images, 2)?;
//! let spectral_error = l2_relative_error(&images, &spectral)?;
//! let max_pool_error = l2_relative_error(&images, &maxed)?;
//! # let _ = (spectral_error, max_pool_error);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::result_large_err)]

pub mod config;
pub mod error;
pub mod ops;
pub mod shape;
pub mod tensor;

pub use config::{
    ComparisonConfig, MaskLayout, MaskSpec, MaxPoolConfig, NormalizationScope, SpectralPoolConfig,
    TilingPolicy,
};
pub use error::{Result, TensorError};
pub use ops::{
    compare_pooling, detect_scale, fft2, fftshift, ifft2, ifftshift, l2_relative_error,
    low_pass_filter, max_pool, max_pool_with_config, min_max_normalize,
    per_sample_l2_relative_error, spectral_pool, spectral_pool_with_config, PixelScale,
    PoolingComparison, SpectralPool, SpectralPoolOutput,
};
pub use rustfft::num_complex::{Complex, Complex32, Complex64};
pub use shape::Shape;
pub use tensor::Tensor;
