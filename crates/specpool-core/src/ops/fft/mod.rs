//! Fourier-domain building blocks
//!
//! 2D transforms, spectrum centering, magnitude/phase helpers and the
//! low-pass masks used by spectral pooling.

pub mod fft2d;
pub mod filter;
pub mod shift;
pub mod spectrum;

pub use fft2d::{fft2, ifft2};
pub use filter::{low_pass_filter, retained_band, retained_fraction};
pub use shift::{fftshift, ifftshift, shift_axis, shift_midpoint, SpatialAxis};
pub use spectrum::{apply_magnitude_mask, check_mask_shape, from_polar, magnitude, phase, real_part};
