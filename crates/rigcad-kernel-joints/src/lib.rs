#![warn(missing_docs)]

//! Woodworking-style joint generators for the rigcad kernel.
//!
//! Each generator takes part records, decides how the two boxes meet,
//! and returns edited copies carrying new CSG cutters — no meshes are
//! touched. Cutters are always expressed in the owning part's local
//! frame, so a joined part can keep moving and its joinery moves with
//! it.
//!
//! Three joints are provided:
//!
//! - [`mortise_tenon`]: one part extends into the other, which gains a
//!   matching pocket.
//! - [`cross_lap`]: two overlapping parts each give up half of the
//!   shared volume.
//! - [`half_lap`]: two bars are extended end-to-end and notched so
//!   they splice flush.

mod cross_lap;
mod half_lap;
mod mortise_tenon;

pub use cross_lap::{cross_lap, CrossLapResult};
pub use half_lap::{half_lap, validate_half_lap, HalfLapCompatibility, HalfLapUpdates, PartUpdate};
pub use mortise_tenon::{mortise_tenon, MortiseTenonResult};

use thiserror::Error;

/// Errors from joint generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JointError {
    /// The two parts' boxes do not share volume on every world axis.
    #[error("Parts must intersect to create a cross-lap joint")]
    PartsDoNotIntersect,

    /// A part has non-finite pose fields or empty dimensions.
    #[error("Part {0} has degenerate geometry")]
    DegenerateGeometry(u64),

    /// A joint parameter is not a usable finite value.
    #[error("Invalid joint parameter: {0}")]
    InvalidParameter(&'static str),
}
