//! Part records and the CSG operations attached to them.

use crate::{Axis, Connector, CsgOperation};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a part.
pub type PartId = u64;

/// Global atomic counter for unique record IDs.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a globally unique ID for a part, connector, or CSG operation.
pub fn alloc_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// 3D vector with f64 components (conventionally millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Vector with all three components set to `v`.
    pub fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// True when all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Full extents of a part's box along its local X, Y, and Z axes.
///
/// Missing components deserialize to 0.0 so that geometry queries stay
/// total over partially-filled records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dims {
    /// Extent along local X (width).
    #[serde(default)]
    pub w: f64,
    /// Extent along local Y (height).
    #[serde(default)]
    pub h: f64,
    /// Extent along local Z (depth).
    #[serde(default)]
    pub d: f64,
}

impl Dims {
    /// Create new dims.
    pub fn new(w: f64, h: f64, d: f64) -> Self {
        Self { w, h, d }
    }

    /// Extent along the given local axis.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.w,
            Axis::Y => self.h,
            Axis::Z => self.d,
        }
    }

    /// Copy with the extent along `axis` replaced by `value`.
    pub fn with_along(&self, axis: Axis, value: f64) -> Self {
        let mut out = *self;
        match axis {
            Axis::X => out.w = value,
            Axis::Y => out.h = value,
            Axis::Z => out.d = value,
        }
        out
    }

    /// Extents as `[w, h, d]`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.w, self.h, self.d]
    }

    /// True when all three extents are finite.
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.h.is_finite() && self.d.is_finite()
    }

    /// True when all three extents are finite and strictly positive.
    pub fn is_solid(&self) -> bool {
        self.is_finite() && self.w > 0.0 && self.h > 0.0 && self.d > 0.0
    }
}

/// A part of a rig assembly — an oriented box with attached CSG
/// operations and connectors.
///
/// `position` is the box center. Children of a group express their pose
/// in the parent's frame; everything else is world space. Kernel
/// functions never mutate a `Part` in place — they return edited copies
/// and the caller swaps whole records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Unique identifier.
    pub id: PartId,
    /// Optional human-readable name.
    #[serde(default)]
    pub name: Option<String>,
    /// Center of the box, in the parent frame (world if no parent).
    #[serde(default)]
    pub position: Vec3,
    /// Euler angles in degrees, applied as X, then Y, then Z.
    #[serde(default)]
    pub rotation: Vec3,
    /// Full extents along the local axes.
    #[serde(default)]
    pub dims: Dims,
    /// Per-axis render scale. Geometric solvers treat `dims` as
    /// authoritative; scale is carried for the renderer.
    #[serde(default)]
    pub scale: Option<Vec3>,
    /// Parent part when this part belongs to a group.
    #[serde(default)]
    pub parent: Option<PartId>,
    /// Connector sockets in the local frame.
    #[serde(default)]
    pub connectors: Vec<Connector>,
    /// CSG edits, each posed relative to this part.
    #[serde(default)]
    pub csg_operations: Vec<CsgOperation>,
}

impl Part {
    /// Create a block part with the given extents, centered at the
    /// origin with no rotation.
    pub fn block(name: &str, w: f64, h: f64, d: f64) -> Self {
        Self {
            id: alloc_id(),
            name: Some(name.to_string()),
            position: Vec3::zero(),
            rotation: Vec3::zero(),
            dims: Dims::new(w, h, d),
            scale: None,
            parent: None,
            connectors: Vec::new(),
            csg_operations: Vec::new(),
        }
    }

    /// Copy with the center moved to `(x, y, z)`.
    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Copy with the rotation set to the given Euler angles in degrees.
    pub fn rotated(mut self, rx: f64, ry: f64, rz: f64) -> Self {
        self.rotation = Vec3::new(rx, ry, rz);
        self
    }

    /// Copy parented to the given group part.
    pub fn child_of(mut self, parent: PartId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Copy with a connector appended.
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connectors.push(connector);
        self
    }

    /// Look up a connector by ID.
    pub fn connector(&self, id: u64) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    /// True when position, rotation, and dims are all finite.
    pub fn pose_is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.dims.is_finite()
    }
}
