//! Rayon-parallel kernel (feature-gated).
//!
//! Output rows are distributed across threads; each row runs the same code
//! as the scalar kernel, so results are bit-identical.

use crate::image::{Image, ImageView};
use crate::kernel::scalar::warp_row;
use crate::kernel::WarpKernel;
use crate::warp::{FieldLines, FieldParams};
use rayon::prelude::*;

/// Row-parallel field warp.
pub struct FieldWarpPar;

impl WarpKernel for FieldWarpPar {
    fn warp_into(src: ImageView<'_>, lines: &FieldLines, params: FieldParams, out: &mut Image) {
        debug_assert_eq!(src.shape(), out.shape());
        let row_len = src.width() * src.channels();
        out.data_mut()
            .par_chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(row, out_row)| warp_row(src, lines, params, row, out_row));
    }
}
