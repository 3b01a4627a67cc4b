//! Image similarity metrics
//!
//! The relative L2 error compares a batch of original images with a batch of
//! modified ones, sample by sample. Batches on the 0-255 scale are brought to
//! 0-1 first so 8-bit inputs can be compared with normalised pooling output.

use crate::{Result, Tensor, TensorError};
use num_traits::Float;
use tracing::{debug, debug_span, warn};

/// Pixel scale inferred from a batch's maximum value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelScale {
    /// Values already in `[0, 1]` (maximum at most 2)
    Unit,
    /// Values in `[0, 255]` (maximum above 2)
    Byte,
}

impl PixelScale {
    pub fn divisor<T: Float>(self) -> T {
        match self {
            PixelScale::Unit => T::one(),
            PixelScale::Byte => T::from(255.0).unwrap_or_else(T::one),
        }
    }
}

/// Guess the scale of a batch: anything whose maximum exceeds 2 is treated
/// as 8-bit pixel data.
pub fn detect_scale<T: Float>(batch: &Tensor<T>) -> PixelScale {
    let two = T::one() + T::one();
    match batch.max_value() {
        Some(max) if max > two => PixelScale::Byte,
        _ => PixelScale::Unit,
    }
}

/// Per-sample `||orig - modified|| / ||orig||` after bringing both batches to
/// the 0-1 scale.
pub fn per_sample_l2_relative_error<T: Float>(
    orig: &Tensor<T>,
    modified: &Tensor<T>,
) -> Result<Vec<T>> {
    if !orig.same_shape(modified) {
        warn!(orig = %orig.shape(), modified = %modified.shape(), "l2 metric shape mismatch");
        return Err(TensorError::shape_mismatch(
            "l2_relative_error",
            &orig.shape().to_string(),
            &modified.shape().to_string(),
        ));
    }
    if orig.rank() == 0 {
        return Err(TensorError::invalid_shape(
            "l2_relative_error",
            "expected a batch with a leading sample axis",
            orig.shape().dims(),
        ));
    }

    let batch = orig.shape()[0];
    let features = orig.shape().sample_size();
    let orig_scale = detect_scale(orig).divisor::<T>();
    let mod_scale = detect_scale(modified).divisor::<T>();
    debug!(
        batch,
        features,
        orig_scale = ?detect_scale(orig),
        modified_scale = ?detect_scale(modified),
        "l2 relative error"
    );

    let orig_values = orig.to_vec();
    let mod_values = modified.to_vec();

    (0..batch)
        .map(|sample| {
            let range = sample * features..(sample + 1) * features;
            let (error_sq, base_sq) = orig_values[range.clone()]
                .iter()
                .zip(&mod_values[range])
                .fold((T::zero(), T::zero()), |(err, base), (&o, &m)| {
                    let o = o / orig_scale;
                    let diff = o - m / mod_scale;
                    (err + diff * diff, base + o * o)
                });

            let base_norm = base_sq.sqrt();
            if base_norm <= T::zero() || !base_norm.is_finite() {
                warn!(sample, "l2 metric reference sample has no energy");
                return Err(TensorError::numerical_error(
                    "l2_relative_error",
                    &format!("original sample {sample} has zero or non-finite norm"),
                    vec!["exclude blank images from the comparison".to_string()],
                ));
            }
            Ok(error_sq.sqrt() / base_norm)
        })
        .collect()
}

/// Mean relative L2 error between two equally shaped batches
pub fn l2_relative_error<T: Float>(orig: &Tensor<T>, modified: &Tensor<T>) -> Result<T> {
    let _span = debug_span!("l2_relative_error", shape = %orig.shape()).entered();
    let errors = per_sample_l2_relative_error(orig, modified)?;
    if errors.is_empty() {
        return Err(TensorError::invalid_argument_op(
            "l2_relative_error",
            "batch is empty",
        ));
    }
    let count = T::from(errors.len()).ok_or_else(|| {
        TensorError::numerical_error(
            "l2_relative_error",
            "batch size is not representable in the element type",
            vec![],
        )
    })?;
    let total = errors.into_iter().fold(T::zero(), |acc, e| acc + e);
    Ok(total / count)
}
