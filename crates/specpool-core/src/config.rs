//! Operator configuration
//!
//! Every pooling entry point has a `*_with_config` variant taking one of the
//! structs below; the plain variants use `Default` with the given pool size.
//! With the `serialize` feature the configs round-trip through serde.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{Result, TensorError};

/// Which elements share one min/max pair during min-max normalisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum NormalizationScope {
    /// One range per channel, taken across batch, height and width
    #[default]
    PerChannel,
    /// One range per `(batch, channel)` image plane
    PerImage,
    /// One range for the whole tensor
    Global,
}

/// Where the DC coefficient sits in a low-pass mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MaskLayout {
    /// DC at `(n/2, n/2)`; applied to an `fftshift`ed spectrum
    #[default]
    Centered,
    /// DC at `(0, 0)`; applied to the raw spectrum
    Corner,
}

/// How max pooling treats spatial dims that `pool_size` does not divide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum TilingPolicy {
    /// Trailing tiles are pooled over the elements they contain
    #[default]
    Partial,
    /// Non-divisible dims are a shape error
    Reject,
}

/// Configuration for [`crate::ops::pooling::spectral_pool_with_config`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SpectralPoolConfig {
    /// Side length of the retained block of low frequencies
    pub pool_size: usize,
    /// Grouping used when rescaling the pooled image to `[0, 1]`
    pub normalization: NormalizationScope,
    /// Layout of the generated (or supplied) mask
    pub mask_layout: MaskLayout,
    /// Caller-supplied mask, `(1|B, 1|C, H, W)`, in `mask_layout`.
    /// When `None` the mask comes from [`crate::ops::fft::low_pass_filter`].
    pub mask: Option<MaskSpec>,
}

/// A serialisable low-pass mask supplied through configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct MaskSpec {
    pub dims: Vec<usize>,
    pub values: Vec<f64>,
}

impl Default for SpectralPoolConfig {
    fn default() -> Self {
        Self {
            pool_size: 4,
            normalization: NormalizationScope::PerChannel,
            mask_layout: MaskLayout::Centered,
            mask: None,
        }
    }
}

impl SpectralPoolConfig {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            ..Default::default()
        }
    }

    pub fn with_normalization(mut self, scope: NormalizationScope) -> Self {
        self.normalization = scope;
        self
    }

    pub fn with_mask_layout(mut self, layout: MaskLayout) -> Self {
        self.mask_layout = layout;
        self
    }

    pub fn with_mask(mut self, mask: MaskSpec) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(TensorError::invalid_argument_op(
                "spectral_pool",
                "pool_size must be at least 1",
            ));
        }
        if let Some(mask) = &self.mask {
            let expected: usize = mask.dims.iter().product();
            if mask.dims.len() != 4 || expected != mask.values.len() {
                return Err(TensorError::invalid_shape(
                    "spectral_pool",
                    &format!(
                        "mask must be 4D with {} values, got {} values",
                        expected,
                        mask.values.len()
                    ),
                    &mask.dims,
                ));
            }
        }
        Ok(())
    }
}

/// Configuration for [`crate::ops::pooling::max_pool_with_config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct MaxPoolConfig {
    /// Tile side length
    pub pool_size: usize,
    pub tiling: TilingPolicy,
}

impl Default for MaxPoolConfig {
    fn default() -> Self {
        Self {
            pool_size: 2,
            tiling: TilingPolicy::Partial,
        }
    }
}

impl MaxPoolConfig {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            ..Default::default()
        }
    }

    pub fn with_tiling(mut self, tiling: TilingPolicy) -> Self {
        self.tiling = tiling;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(TensorError::invalid_argument_op(
                "max_pool",
                "pool_size must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Configuration for [`crate::ops::pooling::compare_pooling`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ComparisonConfig {
    /// Rescale the input batch to `[0, 1]` before pooling
    pub normalize_inputs: bool,
    pub normalization: NormalizationScope,
    pub tiling: TilingPolicy,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            normalize_inputs: true,
            normalization: NormalizationScope::PerChannel,
            tiling: TilingPolicy::Partial,
        }
    }
}
