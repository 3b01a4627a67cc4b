//! Dense CPU tensors
//!
//! - **core**: tensor structure, properties and reductions
//! - **creation**: constructors

pub mod core;
pub mod creation;

pub use core::Tensor;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_constructors() {
        let zeros = Tensor::<f32>::zeros(&[2, 3]);
        assert_eq!(zeros.shape().dims(), &[2, 3]);
        assert_eq!(zeros.numel(), 6);

        let data = Tensor::<f32>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[1, 1, 2, 2]).unwrap();
        assert_eq!(data.get(&[0, 0, 1, 0]), Some(3.0));
        assert_eq!(data.as_slice(), Some(&[1.0, 2.0, 3.0, 4.0][..]));
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(Tensor::<f32>::from_vec(vec![1.0, 2.0, 3.0], &[2, 2]).is_err());
    }

    #[test]
    fn test_from_fn4_uses_nchw_indices() {
        let tensor = Tensor::<f64>::from_fn4((2, 2, 2, 2), |b, c, h, w| {
            (b * 1000 + c * 100 + h * 10 + w) as f64
        });
        assert_eq!(tensor.get(&[1, 0, 1, 1]), Some(1011.0));
        assert_eq!(tensor.get(&[0, 1, 0, 1]), Some(101.0));
    }

    #[test]
    fn test_extrema() {
        let tensor = Tensor::<f32>::from_vec(vec![-2.0, 5.0, 0.5, 1.0], &[4]).unwrap();
        assert_eq!(tensor.max_value(), Some(5.0));
        assert_eq!(tensor.min_value(), Some(-2.0));
        assert_eq!(Tensor::<f32>::zeros(&[0]).max_value(), None);
    }

    #[test]
    fn test_map_preserves_shape() {
        let tensor = Tensor::<f32>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let doubled = tensor.map(|x| x * 2.0);
        assert!(doubled.same_shape(&tensor));
        assert_eq!(doubled.to_vec(), vec![2.0, 4.0, 6.0, 8.0]);
    }
}
