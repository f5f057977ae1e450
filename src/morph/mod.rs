//! Morph orchestration: warp both inputs toward time `t` and cross-dissolve.

use crate::blend::blend;
use crate::correspondence::Correspondences;
use crate::geometry::LineSegment;
use crate::image::{Image, ImageView};
use crate::trace::trace_span;
use crate::util::{MorphError, MorphResult};
use crate::warp::{warp_with, FieldParams};

mod sequence;

#[cfg(feature = "image-io")]
pub use sequence::DirectorySink;
pub use sequence::{
    FrameFailure, FrameSchedule, FrameSink, FrameStamp, MemorySink, SequenceReport,
};

/// Morph configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MorphConfig {
    /// Field weighting constants.
    pub params: FieldParams,
    /// Use the row-parallel warp kernel when the `rayon` feature is enabled.
    pub parallel: bool,
}

/// Produces the frame at time `t` of the morph from `image_a` to `image_b`.
///
/// `image_a` is warped forward by `t` along `seg_a -> seg_b`, `image_b` is
/// warped backward by `1 - t` along `seg_b -> seg_a`, and the two are
/// dissolved with weight `1 - t` on the first. `t = 0` reproduces `image_a`
/// and `t = 1` reproduces `image_b` up to interpolation error.
pub fn morph(
    image_a: ImageView<'_>,
    image_b: ImageView<'_>,
    seg_a: &[LineSegment],
    seg_b: &[LineSegment],
    t: f64,
    params: FieldParams,
) -> MorphResult<Image> {
    morph_with(
        image_a,
        image_b,
        seg_a,
        seg_b,
        t,
        MorphConfig {
            params,
            parallel: false,
        },
    )
}

fn morph_with(
    image_a: ImageView<'_>,
    image_b: ImageView<'_>,
    seg_a: &[LineSegment],
    seg_b: &[LineSegment],
    t: f64,
    cfg: MorphConfig,
) -> MorphResult<Image> {
    check_shapes(image_a, image_b)?;
    let _span = trace_span!("morph", t = t).entered();

    let distorted_a = warp_with(image_a, seg_a, seg_b, t, cfg.params, cfg.parallel)?;
    let distorted_b = warp_with(image_b, seg_b, seg_a, 1.0 - t, cfg.params, cfg.parallel)?;
    blend(distorted_a.view(), distorted_b.view(), 1.0 - t)
}

fn check_shapes(image_a: ImageView<'_>, image_b: ImageView<'_>) -> MorphResult<()> {
    if image_a.shape() != image_b.shape() {
        return Err(MorphError::ShapeMismatch {
            context: "morph inputs",
            left: image_a.shape(),
            right: image_b.shape(),
        });
    }
    Ok(())
}

/// Validated morph inputs that can render any number of frames.
pub struct Morpher {
    image_a: Image,
    image_b: Image,
    correspondences: Correspondences,
    cfg: MorphConfig,
}

impl Morpher {
    /// Checks that both images share a shape and that at least one segment
    /// pair exists, so later frames only fail on output errors.
    pub fn new(
        image_a: Image,
        image_b: Image,
        correspondences: Correspondences,
    ) -> MorphResult<Self> {
        check_shapes(image_a.view(), image_b.view())?;
        if correspondences.is_empty() {
            return Err(MorphError::EmptyCorrespondences);
        }
        Ok(Self {
            image_a,
            image_b,
            correspondences,
            cfg: MorphConfig::default(),
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: MorphConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &MorphConfig {
        &self.cfg
    }

    pub fn correspondences(&self) -> &Correspondences {
        &self.correspondences
    }

    /// Renders the frame at time `t`.
    pub fn frame(&self, t: f64) -> MorphResult<Image> {
        morph_with(
            self.image_a.view(),
            self.image_b.view(),
            self.correspondences.source(),
            self.correspondences.target(),
            t,
            self.cfg,
        )
    }
}
