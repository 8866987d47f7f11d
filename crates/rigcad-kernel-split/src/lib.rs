#![warn(missing_docs)]

//! Plane-split engine: cut one box part into two along a world plane.
//!
//! When the plane sits square on one of the part's local axes the cut
//! is exact: the dimension on that axis is divided and each half is
//! recentered, so no CSG is needed. Any other plane falls back to two
//! full copies, each carrying a huge half-space `subtract` box that
//! the mesh layer realizes as a true boolean cut.
//!
//! # Example
//!
//! ```
//! use rigcad_ir::Part;
//! use rigcad_kernel_math::{KernelConfig, Point3, Vec3};
//! use rigcad_kernel_split::split_by_plane;
//!
//! let beam = Part::block("beam", 100.0, 10.0, 10.0);
//! let cfg = KernelConfig::default();
//! let [left, right] =
//!     split_by_plane(&beam, &Point3::origin(), &Vec3::x(), &cfg).unwrap();
//! assert_eq!(left.dims.w + right.dims.w, 100.0);
//! ```

use rigcad_ir::{alloc_id, Axis, CsgOperation, Dims, Part, RelTransform};
use rigcad_kernel_frame::{adjust_csg_operations, part_pose};
use rigcad_kernel_math::{
    point_to_ir, rot_to_euler_deg, vec_from_ir, vec_to_ir, KernelConfig, Point3, Pose, Rot3, Vec3,
};

/// Split a part by a world plane into two parts.
///
/// The part's pose is read as a world pose; callers working with
/// grouped scenes should resolve parents first. The returned halves
/// carry fresh ids and re-expressed CSG operations so every existing
/// cutter keeps its world pose.
///
/// Fast path: when the plane normal, seen from the part's local frame,
/// is within `cfg.axis_snap` of a local axis, the cut only divides the
/// dimension on that axis. The halves come back ordered low then high
/// along that local axis. Returns `None` when the cut coordinate falls
/// outside the part on that axis.
///
/// Fallback: for any other plane, both halves keep the original
/// dimensions and each gains one `cfg.halfspace_span`-sized `subtract`
/// box covering the discarded side. The first half keeps the side the
/// normal points away from.
///
/// Returns `None` for degenerate geometry: non-finite inputs, zero
/// dims, or a near-zero plane normal.
pub fn split_by_plane(
    part: &Part,
    plane_point: &Point3,
    plane_normal: &Vec3,
    cfg: &KernelConfig,
) -> Option<[Part; 2]> {
    if !part.pose_is_finite() || !part.dims.is_solid() {
        return None;
    }
    if !plane_point.coords.iter().all(|c| c.is_finite())
        || !plane_normal.iter().all(|c| c.is_finite())
    {
        return None;
    }
    let norm = plane_normal.norm();
    if norm < cfg.tolerance.linear {
        return None;
    }
    let normal = plane_normal / norm;

    let pose = part_pose(part);
    let inv = pose.inverse();
    let local_normal = inv.rotation * normal;
    let local_point = inv.apply_point(plane_point);

    // Dominant component of the local normal decides the path.
    let mut axis = Axis::X;
    let mut best = local_normal.x.abs();
    for candidate in [Axis::Y, Axis::Z] {
        let c = local_normal[candidate.index()].abs();
        if c > best {
            axis = candidate;
            best = c;
        }
    }

    if best > 1.0 - cfg.axis_snap {
        tracing::debug!("split part {} along local {:?}", part.id, axis);
        split_along_axis(part, &pose, axis, local_point[axis.index()], cfg)
    } else {
        tracing::debug!("split part {} by half-space cutters", part.id);
        Some(split_by_halfspace(part, &pose, plane_point, &normal, cfg))
    }
}

/// Exact axis cut at local coordinate `cut`.
fn split_along_axis(
    part: &Part,
    pose: &Pose,
    axis: Axis,
    cut: f64,
    cfg: &KernelConfig,
) -> Option<[Part; 2]> {
    let half = part.dims.along(axis) / 2.0;
    if cut <= -half + cfg.tolerance.linear || cut >= half - cfg.tolerance.linear {
        return None;
    }
    let low = half_copy(part, pose, axis, -half, cut);
    let high = half_copy(part, pose, axis, cut, half);
    Some([low, high])
}

/// One half of an axis cut, spanning `[lo, hi]` on `axis` in the
/// part's local frame.
fn half_copy(part: &Part, pose: &Pose, axis: Axis, lo: f64, hi: f64) -> Part {
    let mid = (lo + hi) / 2.0;
    let offset = vec_from_ir(&axis.unit()) * mid;
    let center = pose.apply_point(&Point3::from(offset));
    let mut half = part.clone();
    half.id = alloc_id();
    half.position = point_to_ir(&center);
    half.dims = part.dims.with_along(axis, hi - lo);
    half.csg_operations = adjust_csg_operations(&half, &part.position, &part.rotation);
    half
}

/// General cut: copy the part twice and subtract one half-space from
/// each copy.
fn split_by_halfspace(
    part: &Part,
    pose: &Pose,
    plane_point: &Point3,
    normal: &Vec3,
    cfg: &KernelConfig,
) -> [Part; 2] {
    let span = cfg.halfspace_span;
    // Box local +Z along the plane normal, so one face lies on the
    // plane once the center sits span/2 out. Identity covers the
    // anti-parallel case: the cutter is a cube.
    let rotation = Rot3::rotation_between(&Vec3::z(), normal).unwrap_or_else(Rot3::identity);
    let cutter = |side: f64| -> CsgOperation {
        let center = plane_point + normal * (side * span / 2.0);
        let world = Pose::new(center.coords, rotation);
        let rel = world.in_frame(pose);
        CsgOperation::subtract(
            Dims::new(span, span, span),
            RelTransform::new(vec_to_ir(&rel.translation), rot_to_euler_deg(&rel.rotation)),
        )
    };

    let mut low = part.clone();
    low.id = alloc_id();
    low.csg_operations.push(cutter(1.0));
    let mut high = part.clone();
    high.id = alloc_id();
    high.csg_operations.push(cutter(-1.0));
    [low, high]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigcad_ir::{CsgOpKind, Vec3 as IrVec3};
    use rigcad_kernel_frame::cutter_world_pose;
    use rigcad_kernel_math::rot_from_euler_deg;

    fn cfg() -> KernelConfig {
        KernelConfig::default()
    }

    #[test]
    fn test_center_split_halves_each_cardinal_axis() {
        for axis in Axis::ALL {
            let cube = Part::block("cube", 10.0, 10.0, 10.0);
            let normal = vec_from_ir(&axis.unit());
            let [low, high] =
                split_by_plane(&cube, &Point3::origin(), &normal, &cfg()).unwrap();

            assert!((low.dims.along(axis) - 5.0).abs() < 1e-12);
            assert!((high.dims.along(axis) - 5.0).abs() < 1e-12);
            let lo_pos = vec_from_ir(&low.position);
            let hi_pos = vec_from_ir(&high.position);
            assert!((lo_pos[axis.index()] + 2.5).abs() < 1e-12);
            assert!((hi_pos[axis.index()] - 2.5).abs() < 1e-12);

            for other in Axis::ALL {
                if other != axis {
                    assert!((low.dims.along(other) - 10.0).abs() < 1e-12);
                }
            }
            assert_ne!(low.id, cube.id);
            assert_ne!(high.id, cube.id);
            assert_ne!(low.id, high.id);
        }
    }

    #[test]
    fn test_off_center_split_keeps_the_total_length() {
        let cube = Part::block("cube", 10.0, 10.0, 10.0);
        let [low, high] =
            split_by_plane(&cube, &Point3::new(2.0, 0.0, 0.0), &Vec3::x(), &cfg()).unwrap();
        assert!((low.dims.w - 7.0).abs() < 1e-12);
        assert!((low.position.x + 1.5).abs() < 1e-12);
        assert!((high.dims.w - 3.0).abs() < 1e-12);
        assert!((high.position.x - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_rotated_part_still_gets_the_exact_cut() {
        // Local Y runs along world X after the 90° turn, so a world
        // X-plane is still an exact cut.
        let bar = Part::block("bar", 10.0, 100.0, 10.0).rotated(0.0, 0.0, 90.0);
        let [low, high] =
            split_by_plane(&bar, &Point3::new(10.0, 0.0, 0.0), &Vec3::x(), &cfg()).unwrap();
        assert!((low.dims.h - 40.0).abs() < 1e-9);
        assert!((low.position.x - 30.0).abs() < 1e-9);
        assert!((high.dims.h - 60.0).abs() < 1e-9);
        assert!((high.position.x + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_plane_outside_the_part_yields_none() {
        let cube = Part::block("cube", 10.0, 10.0, 10.0);
        let missed = split_by_plane(&cube, &Point3::new(7.0, 0.0, 0.0), &Vec3::x(), &cfg());
        assert!(missed.is_none());
        let grazing = split_by_plane(&cube, &Point3::new(5.0, 0.0, 0.0), &Vec3::x(), &cfg());
        assert!(grazing.is_none());
    }

    #[test]
    fn test_tilted_plane_falls_back_to_halfspace_cutters() {
        let cube = Part::block("cube", 10.0, 10.0, 10.0);
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let [low, high] = split_by_plane(&cube, &Point3::origin(), &normal, &cfg()).unwrap();

        for half in [&low, &high] {
            assert_eq!(half.dims.as_array(), [10.0, 10.0, 10.0]);
            assert_eq!(half.csg_operations.len(), 1);
            assert_eq!(half.csg_operations[0].op, CsgOpKind::Subtract);
            assert_eq!(half.csg_operations[0].dims.as_array(), [10_000.0; 3]);
        }

        // The part is at the origin with no rotation, so relative
        // coordinates are world coordinates: the first cutter sits on
        // the positive side of the plane, the second on the negative.
        let pos = |p: &Part| vec_from_ir(&p.csg_operations[0].relative_transform.pos);
        assert!((pos(&low).dot(&normal) - 5_000.0).abs() < 1e-6);
        assert!((pos(&high).dot(&normal) + 5_000.0).abs() < 1e-6);

        // Each cutter's local Z is carried onto the plane normal.
        let rot = rot_from_euler_deg(&low.csg_operations[0].relative_transform.rot);
        assert!((rot * Vec3::z() - normal).norm() < 1e-9);
    }

    #[test]
    fn test_existing_cutters_stay_glued_to_both_halves() {
        let mut cube = Part::block("cube", 10.0, 10.0, 10.0);
        cube.csg_operations.push(CsgOperation::subtract(
            Dims::new(2.0, 2.0, 12.0),
            RelTransform::new(IrVec3::new(2.0, 0.0, 0.0), IrVec3::zero()),
        ));
        let before = cutter_world_pose(&part_pose(&cube), &cube.csg_operations[0]);

        let [low, high] =
            split_by_plane(&cube, &Point3::origin(), &Vec3::x(), &cfg()).unwrap();
        for half in [&low, &high] {
            let after = cutter_world_pose(&part_pose(half), &half.csg_operations[0]);
            assert!((after.translation - before.translation).norm() < 1e-12);
        }
        assert!((low.csg_operations[0].relative_transform.pos.x - 4.5).abs() < 1e-12);
        assert!((high.csg_operations[0].relative_transform.pos.x + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_yield_none() {
        let cube = Part::block("cube", 10.0, 10.0, 10.0);
        assert!(split_by_plane(&cube, &Point3::origin(), &Vec3::zeros(), &cfg()).is_none());
        assert!(split_by_plane(
            &cube,
            &Point3::new(f64::NAN, 0.0, 0.0),
            &Vec3::x(),
            &cfg()
        )
        .is_none());
        let flat = Part::block("flat", 10.0, 0.0, 10.0);
        assert!(split_by_plane(&flat, &Point3::origin(), &Vec3::x(), &cfg()).is_none());
    }
}
