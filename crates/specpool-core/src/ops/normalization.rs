//! Min-max normalisation
//!
//! Rescales values to `[0, 1]` with `(x - min) / (max - min)`. The
//! [`NormalizationScope`] decides which elements share a range. A group whose
//! range is non-finite, or no wider than floating-point rounding, is reported
//! as a numerical error instead of being stretched into noise or NaN.

use crate::config::NormalizationScope;
use crate::{Result, Tensor, TensorError};
use ndarray::{ArrayViewMutD, Axis};
use num_traits::Float;
use tracing::warn;

/// Rescale `tensor` to `[0, 1]` group by group.
///
/// `PerChannel` and `PerImage` need an NCHW tensor; `Global` accepts any rank.
pub fn min_max_normalize<T: Float>(
    tensor: &Tensor<T>,
    scope: NormalizationScope,
) -> Result<Tensor<T>> {
    let mut output = tensor.array().clone();
    let slack = rounding_slack::<T>(tensor.shape().dims());

    match scope {
        NormalizationScope::Global => {
            rescale_group(output.view_mut(), slack, "tensor")?;
        }
        NormalizationScope::PerChannel => {
            tensor.shape().ensure_image_batch("min_max_normalize")?;
            for (channel, lane) in output.axis_iter_mut(Axis(1)).enumerate() {
                rescale_group(lane, slack, &format!("channel {channel}"))?;
            }
        }
        NormalizationScope::PerImage => {
            tensor.shape().ensure_image_batch("min_max_normalize")?;
            for (batch, mut image) in output.axis_iter_mut(Axis(0)).enumerate() {
                for (channel, plane) in image.axis_iter_mut(Axis(0)).enumerate() {
                    rescale_group(plane, slack, &format!("image {batch} channel {channel}"))?;
                }
            }
        }
    }

    Ok(Tensor::from_array(output))
}

/// Multiple of machine epsilon a range must exceed to count as signal.
///
/// A 2D FFT round trip over an `h x w` plane leaves error of up to roughly
/// `h * w` ulps relative to the largest value, so the plane size is the scale.
fn rounding_slack<T: Float>(dims: &[usize]) -> T {
    let elements = match dims {
        [.., h, w] => h * w,
        _ => dims.iter().product(),
    };
    T::from(elements.max(1)).map_or_else(T::max_value, |k| k * T::epsilon())
}

/// Value range `(min, max)` of a group, ignoring NaN. `None` when the group is empty.
fn group_range<T: Float>(values: &ArrayViewMutD<'_, T>) -> Option<(T, T)> {
    values.iter().fold(None, |acc, &x| match acc {
        None => Some((x, x)),
        Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
    })
}

fn rescale_group<T: Float>(
    mut values: ArrayViewMutD<'_, T>,
    slack: T,
    label: &str,
) -> Result<()> {
    let Some((min, max)) = group_range(&values) else {
        return Ok(());
    };

    if !min.is_finite() || !max.is_finite() || values.iter().any(|x| x.is_nan()) {
        warn!(group = label, "non-finite values in normalisation group");
        return Err(TensorError::numerical_error(
            "min_max_normalize",
            &format!("{label} contains non-finite values"),
            vec!["check the input for NaN or infinity".to_string()],
        ));
    }

    let range = max - min;
    let magnitude = min.abs().max(max.abs()).max(T::one());
    if range <= slack * magnitude {
        let value = min.to_f64().unwrap_or(f64::NAN);
        warn!(group = label, value, "degenerate normalisation range");
        return Err(TensorError::numerical_error(
            "min_max_normalize",
            &format!("{label} is constant ({value}); its range is within rounding error"),
            vec![
                "use a wider normalisation scope".to_string(),
                "keep more frequencies so the image is not flattened".to_string(),
            ],
        ));
    }

    values.mapv_inplace(|x| (x - min) / range);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_global_scope() {
        let tensor = Tensor::from_vec(vec![2.0f64, 4.0, 6.0, 10.0], &[4]).unwrap();
        let normalized = min_max_normalize(&tensor, NormalizationScope::Global).unwrap();
        assert_eq!(normalized.to_vec(), vec![0.0, 0.25, 0.5, 1.0]);
    }

    #[test]
    fn test_per_channel_scope_spans_batch() {
        // Channel 0 spans [0, 3] across both images, channel 1 spans [10, 40].
        let tensor = Tensor::from_fn4((2, 2, 1, 2), |b, c, _, w| {
            let base = (b * 2 + w) as f64;
            if c == 0 {
                base
            } else {
                (base + 1.0) * 10.0
            }
        });
        let normalized = min_max_normalize(&tensor, NormalizationScope::PerChannel).unwrap();
        assert_abs_diff_eq!(normalized.get(&[0, 0, 0, 0]).unwrap(), 0.0);
        assert_abs_diff_eq!(normalized.get(&[1, 0, 0, 1]).unwrap(), 1.0);
        assert_abs_diff_eq!(normalized.get(&[0, 0, 0, 1]).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalized.get(&[0, 1, 0, 0]).unwrap(), 0.0);
        assert_abs_diff_eq!(normalized.get(&[1, 1, 0, 1]).unwrap(), 1.0);
    }

    #[test]
    fn test_per_image_scope() {
        let tensor = Tensor::from_fn4((2, 1, 1, 2), |b, _, _, w| (b * 100 + w) as f32);
        let normalized = min_max_normalize(&tensor, NormalizationScope::PerImage).unwrap();
        assert_eq!(normalized.to_vec(), vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_constant_group_is_numerical_error() {
        let tensor = Tensor::from_fn4((1, 2, 2, 2), |_, c, h, w| {
            if c == 0 {
                (h + w) as f32
            } else {
                7.0
            }
        });
        let err = min_max_normalize(&tensor, NormalizationScope::PerChannel).unwrap_err();
        assert!(err.is_numerical());
        assert!(err.to_string().contains("channel 1"));
    }

    #[test]
    fn test_rounding_noise_is_numerical_error() {
        let tensor = Tensor::from_fn4((1, 1, 3, 3), |_, _, h, w| {
            0.3f64 + if (h + w) % 2 == 0 { 1e-16 } else { -1e-16 }
        });
        let err = min_max_normalize(&tensor, NormalizationScope::PerImage).unwrap_err();
        assert!(err.is_numerical());

        let small_signal = Tensor::from_fn4((1, 1, 3, 3), |_, _, h, w| 0.3f64 + 1e-6 * (h + w) as f64);
        assert!(min_max_normalize(&small_signal, NormalizationScope::PerImage).is_ok());
    }

    #[test]
    fn test_non_finite_is_numerical_error() {
        let tensor = Tensor::from_vec(vec![0.0f32, f32::INFINITY, 1.0, 2.0], &[1, 1, 2, 2]).unwrap();
        assert!(min_max_normalize(&tensor, NormalizationScope::Global)
            .unwrap_err()
            .is_numerical());
    }

    #[test]
    fn test_per_channel_needs_nchw() {
        let tensor = Tensor::from_vec(vec![0.0f32, 1.0], &[2]).unwrap();
        assert!(matches!(
            min_max_normalize(&tensor, NormalizationScope::PerChannel),
            Err(TensorError::InvalidShape { .. })
        ));
    }
}
