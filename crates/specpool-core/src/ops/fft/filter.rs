//! Low-pass filter masks for spectral pooling

use super::shift::ifftshift;
use crate::config::MaskLayout;
use crate::{Result, Shape, Tensor, TensorError};
use num_traits::Float;

/// Index range `[start, start + k)` of the retained block along an axis of
/// length `n`, in the centred (DC at `n / 2`) convention.
pub fn retained_band(n: usize, pool_size: usize) -> (usize, usize) {
    let k = pool_size.min(n);
    let start = n / 2 - k / 2;
    (start, start + k)
}

/// Build a `(1, 1, n, n)` binary mask keeping a `pool_size x pool_size`
/// block of the lowest frequencies of an `n x n` image batch.
///
/// `shape` is the NCHW shape of the images the mask will be applied to.
/// A `pool_size` of `n` or more keeps every coefficient.
pub fn low_pass_filter<T: Float>(
    shape: &Shape,
    pool_size: usize,
    layout: MaskLayout,
) -> Result<Tensor<T>> {
    let n = shape.ensure_square("low_pass_filter")?;
    if pool_size == 0 {
        return Err(TensorError::invalid_argument_op(
            "low_pass_filter",
            "pool_size must be at least 1",
        ));
    }

    let (start, end) = retained_band(n, pool_size);
    let band = start..end;
    let centered = Tensor::from_fn4((1, 1, n, n), |_, _, h, w| {
        if band.contains(&h) && band.contains(&w) {
            T::one()
        } else {
            T::zero()
        }
    });

    match layout {
        MaskLayout::Centered => Ok(centered),
        MaskLayout::Corner => ifftshift(&centered, n),
    }
}

/// Share of coefficients a mask keeps (entries above one half count as kept)
pub fn retained_fraction<T: Float>(mask: &Tensor<T>) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    let half = T::one() / (T::one() + T::one());
    let kept = mask.array().iter().filter(|&&m| m > half).count();
    kept as f64 / mask.numel() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(mask: &Tensor<f32>, n: usize) -> Vec<Vec<u8>> {
        (0..n)
            .map(|h| {
                (0..n)
                    .map(|w| mask.get(&[0, 0, h, w]).unwrap() as u8)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_centered_block_even() {
        let shape = Shape::from_slice(&[2, 3, 4, 4]);
        let mask = low_pass_filter::<f32>(&shape, 2, MaskLayout::Centered).unwrap();
        assert_eq!(mask.shape().dims(), &[1, 1, 4, 4]);
        assert_eq!(
            rows(&mask, 4),
            vec![
                vec![0, 0, 0, 0],
                vec![0, 1, 1, 0],
                vec![0, 1, 1, 0],
                vec![0, 0, 0, 0],
            ]
        );
    }

    #[test]
    fn test_centered_block_odd_is_symmetric() {
        let shape = Shape::from_slice(&[1, 1, 5, 5]);
        let mask = low_pass_filter::<f32>(&shape, 3, MaskLayout::Centered).unwrap();
        let grid = rows(&mask, 5);
        assert_eq!(grid[0], vec![0, 0, 0, 0, 0]);
        assert_eq!(grid[1], vec![0, 1, 1, 1, 0]);
        assert_eq!(grid[2], vec![0, 1, 1, 1, 0]);
        assert_eq!(grid[3], vec![0, 1, 1, 1, 0]);
        assert_eq!(grid[4], vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_corner_layout_contains_dc() {
        let shape = Shape::from_slice(&[1, 1, 5, 5]);
        let mask = low_pass_filter::<f32>(&shape, 3, MaskLayout::Corner).unwrap();
        let grid = rows(&mask, 5);
        // Frequencies -1, 0, +1 sit at indices 4, 0, 1 in the corner layout.
        assert_eq!(grid[0], vec![1, 1, 0, 0, 1]);
        assert_eq!(grid[1], vec![1, 1, 0, 0, 1]);
        assert_eq!(grid[2], vec![0, 0, 0, 0, 0]);
        assert_eq!(grid[4], vec![1, 1, 0, 0, 1]);
    }

    #[test]
    fn test_full_pool_keeps_everything() {
        let shape = Shape::from_slice(&[1, 1, 6, 6]);
        for pool_size in [6, 7, 100] {
            let mask = low_pass_filter::<f64>(&shape, pool_size, MaskLayout::Centered).unwrap();
            assert_eq!(retained_fraction(&mask), 1.0);
        }
    }

    #[test]
    fn test_retained_fraction() {
        let shape = Shape::from_slice(&[1, 1, 8, 8]);
        let mask = low_pass_filter::<f32>(&shape, 4, MaskLayout::Corner).unwrap();
        assert_eq!(retained_fraction(&mask), 16.0 / 64.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let square = Shape::from_slice(&[1, 1, 4, 4]);
        assert!(matches!(
            low_pass_filter::<f32>(&square, 0, MaskLayout::Centered),
            Err(TensorError::InvalidArgument { .. })
        ));
        let wide = Shape::from_slice(&[1, 1, 4, 8]);
        assert!(matches!(
            low_pass_filter::<f32>(&wide, 2, MaskLayout::Centered),
            Err(TensorError::ShapeMismatch { .. })
        ));
    }
}
