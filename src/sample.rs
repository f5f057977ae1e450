//! Bilinear resampling with clamp-to-edge borders.
//!
//! Corner indices are clamped independently into the image, while the
//! bilinear weights are computed from the unclamped corners. A query on or
//! beyond the last row/column therefore collapses onto the edge pixel instead
//! of wrapping or mirroring. Non-finite locations sample as all zeros.

use crate::geometry::Vec2;
use crate::image::{ImageView, MAX_CHANNELS};
use crate::util::math::{clamp_index, floor_to_u8};

/// Samples `image` at the continuous location `loc` (`x` = column, `y` = row).
///
/// Each channel is the weighted sum of the four surrounding pixels, floored
/// and clamped to `[0, 255]`. Channels past `image.channels()` are 0.
pub fn sample_bilinear(image: ImageView<'_>, loc: Vec2) -> [u8; MAX_CHANNELS] {
    let mut out = [0u8; MAX_CHANNELS];
    sample_bilinear_into(image, loc, &mut out);
    out
}

/// Writes the bilinear sample at `loc` into `out[..image.channels()]` and
/// zeroes the remaining entries.
#[inline]
pub fn sample_bilinear_into(image: ImageView<'_>, loc: Vec2, out: &mut [u8; MAX_CHANNELS]) {
    let width = image.width();
    let height = image.height();
    let channels = image.channels();

    if !loc.x.is_finite() || !loc.y.is_finite() {
        out.fill(0);
        return;
    }

    let col0 = loc.x.floor();
    let row0 = loc.y.floor();
    let col1 = col0 + 1.0;
    let row1 = row0 + 1.0;

    let c0 = clamp_index(col0 as isize, width);
    let c1 = clamp_index(col1 as isize, width);
    let r0 = clamp_index(row0 as isize, height);
    let r1 = clamp_index(row1 as isize, height);

    // Each corner is weighted by the area of the opposite sub-rectangle.
    // Corners clamped onto the same pixel carry the full unit weight.
    let (wx0, wx1) = if c0 == c1 {
        (1.0, 0.0)
    } else {
        (col1 - loc.x, loc.x - col0)
    };
    let (wy0, wy1) = if r0 == r1 {
        (1.0, 0.0)
    } else {
        (row1 - loc.y, loc.y - row0)
    };

    let p00 = image.pixel(r0, c0);
    let p01 = image.pixel(r0, c1);
    let p10 = image.pixel(r1, c0);
    let p11 = image.pixel(r1, c1);

    for ch in 0..channels {
        let value = f64::from(p00[ch]) * wx0 * wy0
            + f64::from(p01[ch]) * wx1 * wy0
            + f64::from(p10[ch]) * wx0 * wy1
            + f64::from(p11[ch]) * wx1 * wy1;
        out[ch] = floor_to_u8(value);
    }
    for slot in out.iter_mut().skip(channels) {
        *slot = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::sample_bilinear;
    use crate::geometry::Vec2;
    use crate::image::Image;

    fn grid_3x3() -> Image {
        Image::new(vec![0, 10, 20, 30, 40, 50, 60, 70, 80], 3, 3, 1).unwrap()
    }

    #[test]
    fn exact_at_pixel_centers() {
        let img = grid_3x3();
        for row in 0..3 {
            for col in 0..3 {
                let s = sample_bilinear(img.view(), Vec2::new(col as f64, row as f64));
                assert_eq!(s[0], img.pixel(row, col)[0]);
                assert_eq!(&s[1..], &[0, 0, 0]);
            }
        }
    }

    #[test]
    fn interpolates_between_neighbors() {
        let img = grid_3x3();
        // (0 + 10 + 30 + 40) / 4
        assert_eq!(sample_bilinear(img.view(), Vec2::new(0.5, 0.5))[0], 20);
        // 0.25 of the way from 40 to 50, floored
        assert_eq!(sample_bilinear(img.view(), Vec2::new(1.25, 1.0))[0], 42);
        // vertical: 10 -> 40 at 0.5
        assert_eq!(sample_bilinear(img.view(), Vec2::new(1.0, 0.5))[0], 25);
    }

    #[test]
    fn clamps_to_edges_outside_the_image() {
        let img = grid_3x3();
        assert_eq!(sample_bilinear(img.view(), Vec2::new(-4.2, -0.5))[0], 0);
        assert_eq!(sample_bilinear(img.view(), Vec2::new(9.0, 9.7))[0], 80);
        assert_eq!(sample_bilinear(img.view(), Vec2::new(1.0, -3.0))[0], 10);
        assert_eq!(sample_bilinear(img.view(), Vec2::new(2.5, 1.0))[0], 50);
        assert_eq!(sample_bilinear(img.view(), Vec2::new(-1.5, 2.0))[0], 60);
    }

    #[test]
    fn reports_all_channels_of_rgba() {
        let img = Image::from_fn(2, 2, 4, |row, col, ch| (row * 100 + col * 20 + ch) as u8).unwrap();
        let s = sample_bilinear(img.view(), Vec2::new(1.0, 1.0));
        assert_eq!(s, [120, 121, 122, 123]);
    }

    #[test]
    fn non_finite_location_falls_back_to_zero() {
        let img = grid_3x3();
        let s = sample_bilinear(img.view(), Vec2::new(f64::NAN, 1.0));
        assert_eq!(s[0], 0);
    }
}
