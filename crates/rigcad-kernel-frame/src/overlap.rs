//! Oriented-box overlap primitives.
//!
//! Everything here works on intervals and projections, not meshes: a
//! part is its oriented box, and overlap questions reduce to projecting
//! half-extents onto directions and intersecting intervals.

use crate::world::part_pose;
use rigcad_ir::{Axis, Dims, Part};
use rigcad_kernel_math::{vec_from_ir, Point3, Pose, Rot3, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb {
    /// Create an AABB from two corners, reordering components as needed.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Smallest AABB containing all points. `None` for an empty slice.
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Some(Self { min, max })
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Extent along a world axis.
    pub fn extent(&self, axis: Axis) -> f64 {
        let i = axis.index();
        self.max[i] - self.min[i]
    }

    /// Intersection with another AABB, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let min = Point3::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x <= max.x && min.y <= max.y && min.z <= max.z {
            Some(Aabb { min, max })
        } else {
            None
        }
    }
}

/// The eight corners of a box with the given full extents, centered at
/// the local origin.
pub fn local_corners(dims: &Dims) -> [Vec3; 8] {
    let hw = dims.w / 2.0;
    let hh = dims.h / 2.0;
    let hd = dims.d / 2.0;
    [
        Vec3::new(-hw, -hh, -hd),
        Vec3::new(hw, -hh, -hd),
        Vec3::new(-hw, hh, -hd),
        Vec3::new(hw, hh, -hd),
        Vec3::new(-hw, -hh, hd),
        Vec3::new(hw, -hh, hd),
        Vec3::new(-hw, hh, hd),
        Vec3::new(hw, hh, hd),
    ]
}

/// The eight corners of a posed box in the outer frame.
pub fn world_corners(pose: &Pose, dims: &Dims) -> [Point3; 8] {
    local_corners(dims).map(|c| pose.apply_point(&Point3::from(c)))
}

/// World axis-aligned bounding box of a part.
///
/// For rotated parts this is the box of the rotated corners — larger
/// than the part itself. The cross-lap generator relies on exactly
/// this conservative behavior.
pub fn world_aabb(part: &Part) -> Option<Aabb> {
    if !part.pose_is_finite() {
        return None;
    }
    Aabb::from_points(&world_corners(&part_pose(part), &part.dims))
}

/// Half-extent of an oriented box projected onto a direction.
///
/// `dir` must be unit length. The projection radius is the sum of each
/// rotated box axis' contribution: `Σ |dir · axisᵢ| · halfᵢ`.
pub fn projected_half_extent(dir: &Vec3, rotation: &Rot3, dims: &Dims) -> f64 {
    Axis::ALL
        .iter()
        .map(|axis| {
            let world_axis = rotation * vec_from_ir(&axis.unit());
            dir.dot(&world_axis).abs() * dims.along(*axis) / 2.0
        })
        .sum()
}

/// Separation between the centered interval `[-half_a, half_a]` and
/// `[min_b, max_b]`. Zero when they touch or overlap.
pub fn interval_gap(half_a: f64, min_b: f64, max_b: f64) -> f64 {
    (min_b - half_a).max(-half_a - max_b).max(0.0)
}

/// Length of the intersection of `[-half_a, half_a]` and
/// `[min_b, max_b]`. Zero when they are disjoint.
pub fn interval_overlap(half_a: f64, min_b: f64, max_b: f64) -> f64 {
    (max_b.min(half_a) - min_b.max(-half_a)).max(0.0)
}

/// Slab test: true when the part's oriented box comes within `margin`
/// of the plane through `point` with unit `normal`.
pub fn touches_plane(part: &Part, point: &Point3, normal: &Vec3, margin: f64) -> bool {
    let pose = part_pose(part);
    let center = Point3::from(pose.translation);
    let dist = (center - point).dot(normal).abs();
    let radius = projected_half_extent(normal, &pose.rotation, &part.dims);
    dist <= radius + margin
}
