//! Directed line segments and the local `(u, v)` frame used by field warping.

use super::Vec2;

/// Directed segment from `start` to `end`.
///
/// The local frame of a segment maps a point to `(u, v)`: `u` is the
/// projection onto the direction normalized so that `u = 0` at `start` and
/// `u = 1` at `end`; `v` is the signed perpendicular distance in pixels from
/// the supporting line, positive on the side of [`LineSegment::perp`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineSegment {
    start: Vec2,
    end: Vec2,
}

impl LineSegment {
    /// Creates a segment from its endpoints.
    #[inline]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Creates a segment from raw endpoint coordinates.
    #[inline]
    pub const fn from_coords(sx: f64, sy: f64, ex: f64, ey: f64) -> Self {
        Self::new(Vec2::new(sx, sy), Vec2::new(ex, ey))
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// `end - start`.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Direction rotated by +90 degrees (same length as the segment).
    #[inline]
    pub fn perp(&self) -> Vec2 {
        self.direction().perp()
    }

    /// Normalized projection `u` of `point` onto the segment direction.
    ///
    /// Values outside `[0, 1]` lie beyond the endpoints.
    #[inline]
    pub fn line_parameter(&self, point: Vec2) -> f64 {
        let dir = self.direction();
        (point - self.start).dot(dir) / dir.length_squared()
    }

    /// Signed perpendicular distance `v` of `point` from the supporting line.
    #[inline]
    pub fn signed_line_distance(&self, point: Vec2) -> f64 {
        (point - self.start).dot(self.perp()) / self.length()
    }

    /// Euclidean distance from `point` to this segment given its `(u, v)`
    /// coordinates.
    ///
    /// Inside the span (`0 <= u <= 1`) this is `|v|`; before the start or past
    /// the end it is the distance to the nearer endpoint. The coordinates may
    /// come from another segment's frame; the field warp relies on that.
    #[inline]
    pub fn segment_distance(&self, point: Vec2, u: f64, v: f64) -> f64 {
        if u < 0.0 {
            (point - self.start).length()
        } else if u > 1.0 {
            (point - self.end).length()
        } else {
            v.abs()
        }
    }

    /// Segment whose endpoints are moved toward `other`'s by fraction `t`.
    #[inline]
    pub fn lerp(&self, other: &LineSegment, t: f64) -> LineSegment {
        LineSegment::new(self.start.lerp(other.start, t), self.end.lerp(other.end, t))
    }

    /// Maps local `(u, v)` coordinates back to image space.
    #[inline]
    pub fn point_at(&self, u: f64, v: f64) -> Vec2 {
        self.start + u * self.direction() + v * (self.perp() / self.length())
    }
}
