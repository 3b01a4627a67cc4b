//! Max pooling baseline
//!
//! Each `(batch, channel)` plane is cut into non-overlapping
//! `pool_size x pool_size` tiles and every element of a tile is replaced by
//! the tile maximum. The output keeps the input shape, which makes it directly
//! comparable with spectral pooling.

use crate::config::{MaxPoolConfig, TilingPolicy};
use crate::{Result, Tensor, TensorError};
use ndarray::{ArrayD, IxDyn};
use rayon::prelude::*;
use std::cmp::min;
use tracing::{debug_span, warn};

/// Max pool with `pool_size x pool_size` tiles and partial trailing tiles
pub fn max_pool<T>(image: &Tensor<T>, pool_size: usize) -> Result<Tensor<T>>
where
    T: Copy + PartialOrd + Send + Sync,
{
    max_pool_with_config(image, &MaxPoolConfig::new(pool_size))
}

/// Max pool an NCHW batch, broadcasting each tile maximum over its tile.
///
/// Height and width are tiled independently, so non-square images are fine.
pub fn max_pool_with_config<T>(image: &Tensor<T>, config: &MaxPoolConfig) -> Result<Tensor<T>>
where
    T: Copy + PartialOrd + Send + Sync,
{
    let _span = debug_span!("max_pool", shape = %image.shape(), pool_size = config.pool_size)
        .entered();

    config.validate()?;
    let (_, _, height, width) = image.shape().image_dims("max_pool")?;
    let pool_size = config.pool_size;

    if config.tiling == TilingPolicy::Reject && (height % pool_size != 0 || width % pool_size != 0)
    {
        warn!(height, width, pool_size, "max_pool tiles do not divide the image");
        return Err(TensorError::shape_mismatch(
            "max_pool",
            &format!("spatial dims divisible by pool_size {pool_size}"),
            &format!("{height}x{width}"),
        ));
    }

    let mut data = image.to_vec();
    let plane_size = height * width;
    if plane_size > 0 {
        data.par_chunks_mut(plane_size)
            .for_each(|plane| pool_plane(plane, height, width, pool_size));
    }

    let output = ArrayD::from_shape_vec(IxDyn(image.shape().dims()), data)?;
    Ok(Tensor::from_array(output))
}

fn pool_plane<T: Copy + PartialOrd>(plane: &mut [T], height: usize, width: usize, pool_size: usize) {
    for h_start in (0..height).step_by(pool_size) {
        for w_start in (0..width).step_by(pool_size) {
            let h_end = min(h_start + pool_size, height);
            let w_end = min(w_start + pool_size, width);

            let mut max_val = plane[h_start * width + w_start];
            for h in h_start..h_end {
                for w in w_start..w_end {
                    let val = plane[h * width + w];
                    if val > max_val {
                        max_val = val;
                    }
                }
            }

            for h in h_start..h_end {
                plane[h * width + w_start..h * width + w_end].fill(max_val);
            }
        }
    }
}
