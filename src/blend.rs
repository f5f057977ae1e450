//! Linear cross-dissolve of two equally shaped images.

use crate::image::{Image, ImageView};
use crate::trace::trace_span;
use crate::util::math::floor_to_u8;
use crate::util::{MorphError, MorphResult};

/// Blends `a` and `b` sample by sample: `floor(a * t + b * (1 - t))`.
///
/// `t = 1` returns `a`, `t = 0` returns `b`, and blending an image with
/// itself returns it unchanged for any `t`. Values of `t` outside `[0, 1]`
/// extrapolate linearly; the result saturates at 0 and 255.
///
/// Fails when the two images differ in width, height or channel count.
pub fn blend(a: ImageView<'_>, b: ImageView<'_>, t: f64) -> MorphResult<Image> {
    if a.shape() != b.shape() {
        return Err(MorphError::ShapeMismatch {
            context: "blend",
            left: a.shape(),
            right: b.shape(),
        });
    }
    let _span = trace_span!("blend", width = a.width(), height = a.height(), t = t).entered();

    let mut out = Image::zeros_like(a.shape());
    for ((dst, &sa), &sb) in out
        .data_mut()
        .iter_mut()
        .zip(a.as_slice())
        .zip(b.as_slice())
    {
        *dst = blend_sample(sa, sb, t);
    }
    Ok(out)
}

/// `b + (a - b) * t`, which equals `a * t + b * (1 - t)` and is exact at
/// `t = 0`, `t = 1` and whenever `a == b`.
#[inline]
fn blend_sample(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    floor_to_u8(b + (a - b) * t)
}
