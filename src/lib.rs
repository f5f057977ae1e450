//! FieldMorph is a CPU feature-based image morphing library.
//!
//! Two images of the same shape are linked by pairs of line segments marking
//! matching features. Each frame warps both images toward an intermediate
//! segment layout with the Beier–Neely field transform and cross-dissolves
//! them. Row-parallel warping is available via the `rayon` feature, image
//! decoding/encoding via `image-io`, and structured spans via `tracing`.

pub mod blend;
pub mod correspondence;
pub mod geometry;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod morph;
pub mod sample;
mod trace;
pub mod util;
pub mod warp;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::blend::blend;
pub use crate::correspondence::Correspondences;
pub use crate::geometry::{LineSegment, Vec2};
pub use crate::image::{Image, ImageShape, ImageView};
pub use crate::morph::{
    morph, FrameFailure, FrameSchedule, FrameSink, FrameStamp, MemorySink, MorphConfig, Morpher,
    SequenceReport,
};
#[cfg(feature = "image-io")]
pub use crate::morph::DirectorySink;
pub use crate::util::{MorphError, MorphResult};
pub use crate::warp::{warp, warp_with, FieldParams};
