//! Scalar helpers shared by the sampler and the blend engine.

/// Clamps a signed index into `[0, len - 1]`.
///
/// `len` must be non-zero.
#[inline]
pub(crate) fn clamp_index(index: isize, len: usize) -> usize {
    if index <= 0 {
        0
    } else {
        (index as usize).min(len - 1)
    }
}

/// Floors an accumulated sample value and saturates it into `u8` range.
///
/// Non-finite input (from degenerate geometry) maps to 0.
#[inline]
pub(crate) fn floor_to_u8(value: f64) -> u8 {
    let floored = value.floor();
    if !floored.is_finite() {
        return 0;
    }
    floored.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::{clamp_index, floor_to_u8};

    #[test]
    fn clamp_index_maps_to_valid_range() {
        assert_eq!(clamp_index(-3, 5), 0);
        assert_eq!(clamp_index(0, 5), 0);
        assert_eq!(clamp_index(4, 5), 4);
        assert_eq!(clamp_index(9, 5), 4);
        assert_eq!(clamp_index(isize::MAX, 1), 0);
    }

    #[test]
    fn floor_to_u8_truncates_and_saturates() {
        assert_eq!(floor_to_u8(127.99), 127);
        assert_eq!(floor_to_u8(-0.5), 0);
        assert_eq!(floor_to_u8(300.0), 255);
        assert_eq!(floor_to_u8(f64::NAN), 0);
    }
}
