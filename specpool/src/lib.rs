//! # specpool
//!
//! Frequency-domain pooling for image batches. Spectral pooling keeps a
//! square block of the lowest spatial frequencies of every image plane and
//! discards the rest, which preserves far more of the image than spatial max
//! pooling at the same pool size.
//!
//! ```rust,no_run
//! use specpool::prelude::*;
//!
//! # fn main() -> specpool::Result<()> {
//! let images = Tensor::<f32>::from_fn4((8, 3, 16, 16), |_, c, h, w| (h + 2 * w + c) as f32);
//!
//! let pool = SpectralPool::new(SpectralPoolConfig::new(6))?;
//! let pooled = pool.forward(&images)?.into_pooled();
//!
//! for row in compare_pooling(&images, &[2, 4, 8], &ComparisonConfig::default())? {
//!     println!("{}: spectral {} / max {}", row.pool_size, row.spectral_error, row.max_pool_error);
//! }
//! # let _ = pooled;
//! # Ok(())
//! # }
//! ```

pub use specpool_core::*;

pub mod prelude {
    pub use specpool_core::config::{
        ComparisonConfig, MaskLayout, MaxPoolConfig, NormalizationScope, SpectralPoolConfig,
        TilingPolicy,
    };
    pub use specpool_core::ops::fft::{fftshift, ifftshift, low_pass_filter};
    pub use specpool_core::ops::metrics::l2_relative_error;
    pub use specpool_core::ops::pooling::{
        compare_pooling, max_pool, spectral_pool, SpectralPool, SpectralPoolOutput,
    };
    pub use specpool_core::{Result, Shape, Tensor, TensorError};
}
