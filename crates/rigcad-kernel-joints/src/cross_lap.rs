//! Cross-lap joint generation.

use crate::JointError;
use rigcad_ir::{Axis, CsgOperation, Dims, Part, RelTransform};
use rigcad_kernel_frame::{part_pose, projected_half_extent, world_aabb, Aabb};
use rigcad_kernel_math::{rot_to_euler_deg, vec_to_ir, KernelConfig, Point3, Pose, Vec3};
use serde::{Deserialize, Serialize};

/// Output of [`cross_lap`]: edited copies of both parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossLapResult {
    /// First part, with its notch cutter appended.
    pub part_a: Part,
    /// Second part, with its notch cutter appended.
    pub part_b: Part,
}

/// Generate a cross-lap joint from two overlapping parts.
///
/// The shared volume is split by a plane perpendicular to the stack
/// axis — the world axis both parts are thinnest along — at the middle
/// of their overlap. Each part gives up its half of the shared volume:
/// the part whose center sits lower along the stack axis is notched
/// from above, the other from below, so the two seat into each other.
///
/// Overlap is measured on world axis-aligned bounding boxes. For
/// rotated parts this over-estimates the shared volume, which errs on
/// the side of accepting a joint; the notch cutters themselves are
/// oriented, so the cut geometry stays exact.
///
/// Fails with [`JointError::PartsDoNotIntersect`] when the boxes do
/// not share at least the configured minimum on every world axis.
pub fn cross_lap(
    a: &Part,
    b: &Part,
    clearance: f64,
    cfg: &KernelConfig,
) -> Result<CrossLapResult, JointError> {
    for part in [a, b] {
        if !part.pose_is_finite() || !part.dims.is_solid() {
            return Err(JointError::DegenerateGeometry(part.id));
        }
    }
    if !clearance.is_finite() || clearance < 0.0 {
        return Err(JointError::InvalidParameter("clearance"));
    }

    let bb_a = world_aabb(a).ok_or(JointError::DegenerateGeometry(a.id))?;
    let bb_b = world_aabb(b).ok_or(JointError::DegenerateGeometry(b.id))?;

    let mut overlap = [(0.0, 0.0); 3];
    for axis in Axis::ALL {
        let i = axis.index();
        let lo = bb_a.min[i].max(bb_b.min[i]);
        let hi = bb_a.max[i].min(bb_b.max[i]);
        if hi - lo < cfg.min_lap_overlap {
            return Err(JointError::PartsDoNotIntersect);
        }
        overlap[i] = (lo, hi);
    }

    let stack = stack_axis(&bb_a, &bb_b);
    let i = stack.index();
    let (lo, hi) = overlap[i];
    let plane = (lo + hi) / 2.0;
    tracing::debug!(
        "cross-lap: stack axis {:?}, cut plane at {:.3}",
        stack,
        plane
    );

    let pose_a = part_pose(a);
    let pose_b = part_pose(b);
    let a_is_lower = pose_a.translation[i] <= pose_b.translation[i];

    let cutter_a = notch_cutter(&pose_a, b, &pose_b, plane, stack, a_is_lower, clearance);
    let cutter_b = notch_cutter(&pose_b, a, &pose_a, plane, stack, !a_is_lower, clearance);

    let mut part_a = a.clone();
    part_a.csg_operations.push(cutter_a);
    let mut part_b = b.clone();
    part_b.csg_operations.push(cutter_b);

    Ok(CrossLapResult { part_a, part_b })
}

/// The world axis both parts are thinnest along.
///
/// Each part ranks its three world extents (0 = thinnest); the axis
/// with the lowest rank sum wins, ties preferring Z, then Y, then X.
fn stack_axis(bb_a: &Aabb, bb_b: &Aabb) -> Axis {
    let ranks = |bb: &Aabb| -> [usize; 3] {
        let e = [bb.extent(Axis::X), bb.extent(Axis::Y), bb.extent(Axis::Z)];
        let mut r = [0usize; 3];
        for i in 0..3 {
            r[i] = e.iter().filter(|&&x| x < e[i]).count();
        }
        r
    };
    let ra = ranks(bb_a);
    let rb = ranks(bb_b);
    let mut best = Axis::Z;
    let mut best_sum = ra[2] + rb[2];
    for axis in [Axis::Y, Axis::X] {
        let sum = ra[axis.index()] + rb[axis.index()];
        if sum < best_sum {
            best = axis;
            best_sum = sum;
        }
    }
    best
}

/// Cutter that removes the owner's half of the shared volume.
///
/// Shaped like the other part inflated by the clearance, at the other
/// part's orientation, slid along the stack axis until its near face
/// sits exactly on the cut plane.
fn notch_cutter(
    owner_pose: &Pose,
    other: &Part,
    other_pose: &Pose,
    plane: f64,
    stack: Axis,
    remove_above: bool,
    clearance: f64,
) -> CsgOperation {
    let inflated = Dims::new(
        other.dims.w + 2.0 * clearance,
        other.dims.h + 2.0 * clearance,
        other.dims.d + 2.0 * clearance,
    );
    let i = stack.index();
    let mut dir = Vec3::zeros();
    dir[i] = 1.0;
    let radius = projected_half_extent(&dir, &other_pose.rotation, &inflated);

    let mut center = Point3::from(other_pose.translation);
    center[i] = if remove_above {
        plane + radius
    } else {
        plane - radius
    };

    let world = Pose::new(center.coords, other_pose.rotation);
    let rel = world.in_frame(owner_pose);
    CsgOperation::subtract(
        inflated,
        RelTransform::new(vec_to_ir(&rel.translation), rot_to_euler_deg(&rel.rotation)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigcad_ir::CsgOpKind;

    fn cfg() -> KernelConfig {
        KernelConfig::default()
    }

    #[test]
    fn test_perpendicular_bars_notch_each_other() {
        let a = Part::block("rail", 100.0, 10.0, 10.0);
        let b = Part::block("post", 10.0, 10.0, 100.0);
        let result = cross_lap(&a, &b, 0.0, &cfg()).unwrap();

        // Both bars are 10 thick in Y, so the notches stack along Y.
        let op_a = &result.part_a.csg_operations[0];
        assert_eq!(op_a.op, CsgOpKind::Subtract);
        assert_eq!(op_a.dims.as_array(), [10.0, 10.0, 100.0]);
        assert!((op_a.relative_transform.pos.y - 5.0).abs() < 1e-9);
        assert!(op_a.relative_transform.pos.x.abs() < 1e-9);

        let op_b = &result.part_b.csg_operations[0];
        assert_eq!(op_b.dims.as_array(), [100.0, 10.0, 10.0]);
        assert!((op_b.relative_transform.pos.y + 5.0).abs() < 1e-9);

        // Inputs are untouched.
        assert!(a.csg_operations.is_empty());
        assert!(b.csg_operations.is_empty());
    }

    #[test]
    fn test_disjoint_parts_are_rejected_with_message() {
        let a = Part::block("a", 10.0, 10.0, 10.0);
        let b = Part::block("b", 10.0, 10.0, 10.0).at(20.0, 0.0, 0.0);
        let err = cross_lap(&a, &b, 0.0, &cfg()).unwrap_err();
        assert_eq!(err, JointError::PartsDoNotIntersect);
        assert_eq!(
            err.to_string(),
            "Parts must intersect to create a cross-lap joint"
        );
    }

    #[test]
    fn test_overlap_below_minimum_is_rejected() {
        // 0.9 mm of shared depth on Z: under the 1 mm minimum.
        let a = Part::block("plate", 50.0, 50.0, 5.0);
        let b = Part::block("plate", 50.0, 50.0, 5.0).at(20.0, 20.0, 4.1);
        assert_eq!(
            cross_lap(&a, &b, 0.0, &cfg()).unwrap_err(),
            JointError::PartsDoNotIntersect
        );
    }

    #[test]
    fn test_offset_plates_cut_at_overlap_middle() {
        // Plates overlapping by exactly 1 mm along Z.
        let a = Part::block("plate", 50.0, 50.0, 5.0);
        let b = Part::block("plate", 50.0, 50.0, 5.0).at(20.0, 20.0, 4.0);
        let result = cross_lap(&a, &b, 0.0, &cfg()).unwrap();

        // Overlap on Z is [1.5, 2.5]; plane at 2.0. A is lower, so its
        // cutter hangs above the plane: center z = 2.0 + 2.5 = 4.5, at
        // B's x/y center.
        let op_a = &result.part_a.csg_operations[0];
        assert!((op_a.relative_transform.pos.x - 20.0).abs() < 1e-9);
        assert!((op_a.relative_transform.pos.y - 20.0).abs() < 1e-9);
        assert!((op_a.relative_transform.pos.z - 4.5).abs() < 1e-9);

        // B's cutter hangs below: world z = -0.5, local z = -4.5.
        let op_b = &result.part_b.csg_operations[0];
        assert!((op_b.relative_transform.pos.x + 20.0).abs() < 1e-9);
        assert!((op_b.relative_transform.pos.y + 20.0).abs() < 1e-9);
        assert!((op_b.relative_transform.pos.z + 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_clearance_inflates_the_notches() {
        let a = Part::block("rail", 100.0, 10.0, 10.0);
        let b = Part::block("post", 10.0, 10.0, 100.0);
        let result = cross_lap(&a, &b, 0.25, &cfg()).unwrap();
        assert_eq!(
            result.part_a.csg_operations[0].dims.as_array(),
            [10.5, 10.5, 100.5]
        );
    }

    #[test]
    fn test_same_inputs_give_same_geometry() {
        let a = Part::block("rail", 100.0, 10.0, 10.0).rotated(0.0, 30.0, 0.0);
        let b = Part::block("post", 10.0, 10.0, 100.0).at(5.0, 2.0, 0.0);
        let r1 = cross_lap(&a, &b, 0.5, &cfg()).unwrap();
        let r2 = cross_lap(&a, &b, 0.5, &cfg()).unwrap();
        let (op1, op2) = (
            &r1.part_a.csg_operations[0],
            &r2.part_a.csg_operations[0],
        );
        assert_eq!(op1.dims, op2.dims);
        assert_eq!(op1.relative_transform, op2.relative_transform);
        // Fresh records still mint fresh IDs.
        assert_ne!(op1.id, op2.id);
    }

    #[test]
    fn test_degenerate_part_is_reported_by_id() {
        let a = Part::block("rail", 100.0, 10.0, 10.0);
        let flat = Part::block("flat", 10.0, 10.0, 0.0);
        assert_eq!(
            cross_lap(&a, &flat, 0.0, &cfg()).unwrap_err(),
            JointError::DegenerateGeometry(flat.id)
        );
        assert_eq!(
            cross_lap(&a, &a, f64::NAN, &cfg()).unwrap_err(),
            JointError::InvalidParameter("clearance")
        );
    }
}
