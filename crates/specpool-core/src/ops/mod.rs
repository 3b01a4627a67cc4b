pub mod fft;
pub mod metrics;
pub mod normalization;
pub mod pooling;

pub use fft::{
    apply_magnitude_mask, fft2, fftshift, ifft2, ifftshift, low_pass_filter, magnitude, phase,
    real_part,
};
pub use metrics::{detect_scale, l2_relative_error, per_sample_l2_relative_error, PixelScale};
pub use normalization::min_max_normalize;
pub use pooling::{
    compare_pooling, max_pool, max_pool_with_config, spectral_pool, spectral_pool_with_config,
    PoolingComparison, SpectralPool, SpectralPoolOutput,
};
