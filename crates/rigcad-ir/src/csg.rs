//! CSG edit records carried by parts.
//!
//! The kernel never evaluates booleans itself. It emits declarative
//! box cutters posed relative to their owning part; the renderer
//! realizes them. Keeping every cutter in the owner's local frame is
//! what lets a part move or rotate without re-deriving its edits:
//! world cutter pose = part world pose ∘ relative transform, always.

use crate::{alloc_id, Dims, Vec3};
use serde::{Deserialize, Serialize};

/// Unique identifier for a CSG operation.
pub type CsgOpId = u64;

/// Kind of boolean edit a cutter applies to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsgOpKind {
    /// Remove the cutter volume from the part.
    Subtract,
    /// Add the cutter volume to the part.
    Union,
}

/// Pose of a cutter relative to its owning part.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelTransform {
    /// Cutter center in the owner's local frame.
    #[serde(default)]
    pub pos: Vec3,
    /// Euler angles in degrees, applied as X, then Y, then Z.
    #[serde(default)]
    pub rot: Vec3,
}

impl RelTransform {
    /// Create a relative transform from position and rotation.
    pub fn new(pos: Vec3, rot: Vec3) -> Self {
        Self { pos, rot }
    }
}

/// A box-shaped CSG edit attached to a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsgOperation {
    /// Unique identifier.
    pub id: CsgOpId,
    /// Boolean kind.
    pub op: CsgOpKind,
    /// Full extents of the cutter box.
    #[serde(default)]
    pub dims: Dims,
    /// Cutter pose in the owning part's local frame.
    #[serde(default)]
    pub relative_transform: RelTransform,
    /// Per-axis render scale, carried for the renderer.
    #[serde(default)]
    pub scale: Option<Vec3>,
}

impl CsgOperation {
    /// Create a subtract cutter with a fresh ID.
    pub fn subtract(dims: Dims, relative_transform: RelTransform) -> Self {
        Self {
            id: alloc_id(),
            op: CsgOpKind::Subtract,
            dims,
            relative_transform,
            scale: None,
        }
    }

    /// Create a union cutter with a fresh ID.
    pub fn union(dims: Dims, relative_transform: RelTransform) -> Self {
        Self {
            id: alloc_id(),
            op: CsgOpKind::Union,
            dims,
            relative_transform,
            scale: None,
        }
    }
}
