//! Spectral pooling versus max pooling
//!
//! Runs both operators over the same batch for a range of max-pool kernel
//! sizes and reports how far each output drifts from the input under the
//! relative L2 error.
//!
//! A kernel of `k` downsamples each axis by `k`. The spectral side is given
//! the same factor: it keeps an `n / k` block of the lowest frequencies of an
//! `n x n` image, so both operators get more lossy as `k` grows.

use super::basic_pooling::max_pool_with_config;
use super::spectral_pooling::spectral_pool_with_config;
use crate::config::{ComparisonConfig, MaxPoolConfig, NormalizationScope, SpectralPoolConfig};
use crate::ops::metrics::l2_relative_error;
use crate::ops::normalization::min_max_normalize;
use crate::{Result, Tensor, TensorError};
use num_traits::Float;
use rustfft::FftNum;
use std::borrow::Cow;
use tracing::{debug, info_span};

/// Errors left by both operators at one kernel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolingComparison<T> {
    /// Max-pool kernel side
    pub pool_size: usize,
    /// Side of the frequency block spectral pooling kept, `max(n / pool_size, 1)`
    pub retained_block: usize,
    pub spectral_error: T,
    pub max_pool_error: T,
}

impl<T: Float> PoolingComparison<T> {
    /// Whether spectral pooling kept the image closer to the input
    pub fn spectral_wins(&self) -> bool {
        self.spectral_error < self.max_pool_error
    }
}

/// Compare spectral pooling and max pooling on `images` for every max-pool
/// kernel size in `pool_sizes`, in order.
pub fn compare_pooling<T>(
    images: &Tensor<T>,
    pool_sizes: &[usize],
    config: &ComparisonConfig,
) -> Result<Vec<PoolingComparison<T>>>
where
    T: Float + FftNum,
{
    let _span = info_span!(
        "compare_pooling",
        shape = %images.shape(),
        sizes = pool_sizes.len()
    )
    .entered();

    if pool_sizes.is_empty() {
        return Err(TensorError::invalid_argument_op(
            "compare_pooling",
            "at least one pool size is required",
        ));
    }
    let n = images.shape().ensure_square("compare_pooling")?;
    if pool_sizes.contains(&0) {
        return Err(TensorError::invalid_argument_op(
            "compare_pooling",
            "pool sizes must be at least 1",
        ));
    }

    let reference: Cow<'_, Tensor<T>> = if config.normalize_inputs {
        Cow::Owned(min_max_normalize(images, NormalizationScope::Global)?)
    } else {
        Cow::Borrowed(images)
    };

    pool_sizes
        .iter()
        .map(|&pool_size| {
            let retained_block = (n / pool_size).max(1);
            let spectral_config =
                SpectralPoolConfig::new(retained_block).with_normalization(config.normalization);
            let max_config = MaxPoolConfig::new(pool_size).with_tiling(config.tiling);

            let spectral = spectral_pool_with_config(&reference, &spectral_config)?.into_pooled();
            let maxed = max_pool_with_config(&reference, &max_config)?;

            let comparison = PoolingComparison {
                pool_size,
                retained_block,
                spectral_error: l2_relative_error(&reference, &spectral)?,
                max_pool_error: l2_relative_error(&reference, &maxed)?,
            };
            debug!(
                pool_size,
                retained_block,
                spectral = comparison.spectral_error.to_f64(),
                max_pool = comparison.max_pool_error.to_f64(),
                "pooling errors"
            );
            Ok(comparison)
        })
        .collect()
}
