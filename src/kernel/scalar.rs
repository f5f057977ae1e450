//! Scalar reference kernel.

use crate::geometry::Vec2;
use crate::image::{Image, ImageView, MAX_CHANNELS};
use crate::kernel::WarpKernel;
use crate::sample::sample_bilinear_into;
use crate::warp::{FieldLines, FieldParams};

/// Sequential row-by-row field warp.
pub struct FieldWarpScalar;

impl WarpKernel for FieldWarpScalar {
    fn warp_into(src: ImageView<'_>, lines: &FieldLines, params: FieldParams, out: &mut Image) {
        debug_assert_eq!(src.shape(), out.shape());
        let row_len = src.width() * src.channels();
        for (row, out_row) in out.data_mut().chunks_exact_mut(row_len).enumerate() {
            warp_row(src, lines, params, row, out_row);
        }
    }
}

/// Renders destination row `row` into `out_row` (`width * channels` samples).
#[inline]
pub(crate) fn warp_row(
    src: ImageView<'_>,
    lines: &FieldLines,
    params: FieldParams,
    row: usize,
    out_row: &mut [u8],
) {
    let channels = src.channels();
    let mut sample = [0u8; MAX_CHANNELS];
    for (col, out_px) in out_row.chunks_exact_mut(channels).enumerate() {
        let curr = Vec2::new(col as f64, row as f64);
        let loc = lines.source_coordinate(curr, params);
        sample_bilinear_into(src, loc, &mut sample);
        out_px.copy_from_slice(&sample[..channels]);
    }
}
