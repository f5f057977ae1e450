//! Low-level building blocks for custom morph pipelines.
//!
//! These expose the per-pixel inverse map, resolved field lines, the
//! bilinear sampler and the warp kernels. Most users should prefer the
//! top-level `warp`, `blend`, `morph` and `Morpher` APIs.

pub use crate::kernel::scalar::FieldWarpScalar;
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::FieldWarpPar;
pub use crate::kernel::WarpKernel;
pub use crate::sample::{sample_bilinear, sample_bilinear_into};
pub use crate::warp::{source_coordinate, FieldLine, FieldLines};
