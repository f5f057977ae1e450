//! Beier–Neely field warping.
//!
//! The warp is an inverse map: every destination pixel `X` asks each segment
//! pair where it would come from. Pair `i` animates its source segment toward
//! its target by `t`, expresses `X` in the animated segment's `(u, v)` frame,
//! and maps those coordinates back through the source segment. The resulting
//! displacements are averaged with weights
//! `(len^p / (a + dist))^b`, where `len` is the source segment length and
//! `dist` is the distance from `X` to the source segment measured with the
//! animated segment's `(u, v)`. The averaged location is resampled
//! bilinearly.

use crate::geometry::{LineSegment, Vec2};
use crate::image::{Image, ImageView};
#[cfg(feature = "rayon")]
use crate::kernel::rayon::FieldWarpPar;
use crate::kernel::scalar::FieldWarpScalar;
use crate::kernel::WarpKernel;
use crate::trace::{trace_event, trace_span};
use crate::util::{MorphError, MorphResult};

/// Shape constants of the field weighting function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    /// Offset added to the distance; keeps weights finite on the segment and
    /// trades local precision for smoothness. With `a = 0` a pixel on a source
    /// segment follows that segment exactly.
    pub a: f64,
    /// Falloff exponent.
    pub b: f64,
    /// Length exponent; larger values favor long segments.
    pub p: f64,
}

impl FieldParams {
    pub const fn new(a: f64, b: f64, p: f64) -> Self {
        Self { a, b, p }
    }

    /// Weight of a segment of length `len` for a pixel at distance `dist`.
    #[inline]
    pub fn weight(&self, len: f64, dist: f64) -> f64 {
        (len.powf(self.p) / (self.a + dist)).powf(self.b)
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            a: 0.5,
            b: 1.0,
            p: 0.2,
        }
    }
}

/// One segment pair resolved at a fixed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldLine {
    /// Segment in the image being sampled.
    pub source: LineSegment,
    /// Source segment animated toward its target by `t`.
    pub animated: LineSegment,
    /// Cached `source.length()`.
    source_length: f64,
}

impl FieldLine {
    pub fn new(source: LineSegment, target: LineSegment, t: f64) -> Self {
        Self {
            source,
            animated: source.lerp(&target, t),
            source_length: source.length(),
        }
    }

    /// Displacement and weight this pair contributes at `curr`.
    #[inline]
    pub fn contribution(&self, curr: Vec2, params: FieldParams) -> (Vec2, f64) {
        let u = self.animated.line_parameter(curr);
        let v = self.animated.signed_line_distance(curr);
        let mapped = self.source.point_at(u, v);
        let dist = self.source.segment_distance(curr, u, v);
        (mapped - curr, params.weight(self.source_length, dist))
    }
}

/// Immutable set of field lines for one warp at time `t`.
#[derive(Clone, Debug)]
pub struct FieldLines {
    lines: Vec<FieldLine>,
    t: f64,
}

impl FieldLines {
    /// Resolves every pair at time `t`.
    ///
    /// Fails when the lists differ in length or are empty.
    pub fn new(seg_source: &[LineSegment], seg_target: &[LineSegment], t: f64) -> MorphResult<Self> {
        if seg_source.len() != seg_target.len() {
            return Err(MorphError::SegmentCountMismatch {
                source_len: seg_source.len(),
                target_len: seg_target.len(),
            });
        }
        if seg_source.is_empty() {
            return Err(MorphError::EmptyCorrespondences);
        }
        let lines = seg_source
            .iter()
            .zip(seg_target)
            .map(|(source, target)| FieldLine::new(*source, *target, t))
            .collect();
        Ok(Self { lines, t })
    }

    pub fn lines(&self) -> &[FieldLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    /// Location in the source image that destination point `curr` samples.
    ///
    /// A line with infinite weight (`a = 0` and `curr` on the line) decides
    /// the result alone, which is the limit of the weighted average.
    #[inline]
    pub fn source_coordinate(&self, curr: Vec2, params: FieldParams) -> Vec2 {
        let mut dis_sum = Vec2::ZERO;
        let mut weight_sum = 0.0;
        for line in &self.lines {
            let (dis, weight) = line.contribution(curr, params);
            if weight == f64::INFINITY {
                return curr + dis;
            }
            dis_sum += dis * weight;
            weight_sum += weight;
        }
        curr + dis_sum / weight_sum
    }
}

/// Inverse-maps a single destination point.
pub fn source_coordinate(
    curr: Vec2,
    seg_source: &[LineSegment],
    seg_target: &[LineSegment],
    t: f64,
    params: FieldParams,
) -> MorphResult<Vec2> {
    Ok(FieldLines::new(seg_source, seg_target, t)?.source_coordinate(curr, params))
}

/// Warps `image` so features on `seg_source` move a fraction `t` of the way
/// toward `seg_target`.
///
/// Returns a new image of the same shape. Fails before any pixel work when
/// the segment lists are empty or differ in length.
pub fn warp(
    image: ImageView<'_>,
    seg_source: &[LineSegment],
    seg_target: &[LineSegment],
    t: f64,
    params: FieldParams,
) -> MorphResult<Image> {
    warp_with(image, seg_source, seg_target, t, params, false)
}

/// Like [`warp`], optionally using the row-parallel kernel.
///
/// `parallel` has no effect unless the `rayon` feature is enabled. Both
/// kernels produce identical output.
pub fn warp_with(
    image: ImageView<'_>,
    seg_source: &[LineSegment],
    seg_target: &[LineSegment],
    t: f64,
    params: FieldParams,
    parallel: bool,
) -> MorphResult<Image> {
    let lines = FieldLines::new(seg_source, seg_target, t)?;
    let _span = trace_span!(
        "warp",
        width = image.width(),
        height = image.height(),
        segments = lines.len(),
        t = t,
        parallel = parallel
    )
    .entered();

    let mut out = Image::zeros_like(image.shape());
    #[cfg(feature = "rayon")]
    if parallel {
        <FieldWarpPar as WarpKernel>::warp_into(image, &lines, params, &mut out);
        trace_event!("warp_done", pixels = image.width() * image.height());
        return Ok(out);
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;

    <FieldWarpScalar as WarpKernel>::warp_into(image, &lines, params, &mut out);
    trace_event!("warp_done", pixels = image.width() * image.height());
    Ok(out)
}
