#![warn(missing_docs)]

//! Math types for the rigcad geometry kernel.
//!
//! Thin wrappers around nalgebra providing the types the kernel works
//! in: points, vectors, rigid poses, and the tolerance/threshold
//! configuration shared by every solver. Conversions to and from the
//! serde-friendly [`rigcad_ir`] records live here too.

use nalgebra::{Rotation3, Unit, Vector2, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A rotation in 3D space.
pub type Rot3 = Rotation3<f64>;

/// A point in 2D space (face-plane coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

// =============================================================================
// IR conversions
// =============================================================================

/// Convert an IR vector to a nalgebra vector.
pub fn vec_from_ir(v: &rigcad_ir::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Convert an IR vector to a nalgebra point.
pub fn point_from_ir(v: &rigcad_ir::Vec3) -> Point3 {
    Point3::new(v.x, v.y, v.z)
}

/// Convert a nalgebra vector to an IR vector.
pub fn vec_to_ir(v: &Vec3) -> rigcad_ir::Vec3 {
    rigcad_ir::Vec3::new(v.x, v.y, v.z)
}

/// Convert a nalgebra point to an IR vector.
pub fn point_to_ir(p: &Point3) -> rigcad_ir::Vec3 {
    rigcad_ir::Vec3::new(p.x, p.y, p.z)
}

/// Rotation from IR Euler angles in degrees, applied as X, then Y, then Z.
pub fn rot_from_euler_deg(angles: &rigcad_ir::Vec3) -> Rot3 {
    Rot3::from_euler_angles(
        angles.x.to_radians(),
        angles.y.to_radians(),
        angles.z.to_radians(),
    )
}

/// IR Euler angles in degrees (X, then Y, then Z order) from a rotation.
pub fn rot_to_euler_deg(rot: &Rot3) -> rigcad_ir::Vec3 {
    let (rx, ry, rz) = rot.euler_angles();
    rigcad_ir::Vec3::new(rx.to_degrees(), ry.to_degrees(), rz.to_degrees())
}

// =============================================================================
// Rigid pose
// =============================================================================

/// A rigid transform — rotation followed by translation.
///
/// Unlike a general affine matrix a rigid pose is always invertible,
/// which keeps frame changes total: no solver path has to handle a
/// singular matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Rotation component.
    pub rotation: Rot3,
    /// Position of the local origin in the outer frame.
    pub translation: Vec3,
}

impl Pose {
    /// Identity pose.
    pub fn identity() -> Self {
        Self {
            rotation: Rot3::identity(),
            translation: Vec3::zeros(),
        }
    }

    /// Pose from translation and rotation.
    pub fn new(translation: Vec3, rotation: Rot3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Pose from an IR position and IR Euler angles in degrees.
    pub fn from_ir(position: &rigcad_ir::Vec3, euler_deg: &rigcad_ir::Vec3) -> Self {
        Self {
            rotation: rot_from_euler_deg(euler_deg),
            translation: vec_from_ir(position),
        }
    }

    /// Compose: the result applies `other` first, then `self`.
    pub fn compose(&self, other: &Pose) -> Pose {
        Pose {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    /// Inverse pose.
    pub fn inverse(&self) -> Pose {
        let inv_rot = self.rotation.inverse();
        Pose {
            rotation: inv_rot,
            translation: -(inv_rot * self.translation),
        }
    }

    /// This pose re-expressed in another frame: `frame⁻¹ ∘ self`.
    ///
    /// This is the primitive every joint generator is built on: to pose
    /// a cutter relative to the part that owns it, take the cutter's
    /// world pose in the frame of the owner's world pose.
    pub fn in_frame(&self, frame: &Pose) -> Pose {
        frame.inverse().compose(self)
    }

    /// Transform a point from the local frame to the outer frame.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.rotation * p + self.translation
    }

    /// Transform a vector (rotation only).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.rotation * v
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

// =============================================================================
// Tolerances and kernel configuration
// =============================================================================

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 mm linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two lengths are effectively equal.
    pub fn lengths_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Tunable thresholds for the geometry kernel.
///
/// Every kernel entry point takes one of these; the defaults match the
/// interactive editor. Keeping the knobs in one place is deliberate —
/// earlier revisions scattered them as per-file constants and tuning
/// one meant hunting for all of them.
#[derive(Debug, Clone, Copy)]
pub struct KernelConfig {
    /// Geometric comparison tolerances.
    pub tolerance: Tolerance,
    /// How close a unit component must be to ±1 for a direction to
    /// count as axis-aligned (split fast path).
    pub axis_snap: f64,
    /// Extra margin on the slab test when collecting drill overlap
    /// candidates, in mm.
    pub slab_margin: f64,
    /// Minimum extent of the shared volume, per world axis, for a
    /// cross-lap joint to be satisfiable, in mm.
    pub min_lap_overlap: f64,
    /// Edge length of the half-space stand-in cube used by splits
    /// along arbitrary planes, in mm.
    pub halfspace_span: f64,
    /// Default snap radius for drill candidate snapping, in mm.
    pub snap_radius: f64,
}

impl KernelConfig {
    /// Defaults used by the interactive editor.
    pub const DEFAULT: Self = Self {
        tolerance: Tolerance::DEFAULT,
        axis_snap: 0.01,
        slab_margin: 0.1,
        min_lap_overlap: 1.0,
        halfspace_span: 10_000.0,
        snap_radius: 5.0,
    };
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
