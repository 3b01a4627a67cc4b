//! Pooling operators
//!
//! Spectral pooling, the max pooling baseline it is measured against, and a
//! helper that runs both and scores them.

pub mod basic_pooling;
pub mod comparison;
pub mod spectral_pooling;

pub use basic_pooling::{max_pool, max_pool_with_config};
pub use comparison::{compare_pooling, PoolingComparison};
pub use spectral_pooling::{
    spectral_pool, spectral_pool_with_config, SpectralPool, SpectralPoolOutput,
};
