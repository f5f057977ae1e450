//! Field warp kernel implementations.
//!
//! Each output pixel is computed independently from immutable inputs, so the
//! kernels differ only in how rows are scheduled.

use crate::image::{Image, ImageView};
use crate::warp::{FieldLines, FieldParams};

/// Kernel trait for rendering a warped image.
pub trait WarpKernel {
    /// Fills `out` (same shape as `src`) with `src` resampled through `lines`.
    fn warp_into(src: ImageView<'_>, lines: &FieldLines, params: FieldParams, out: &mut Image);
}

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;
