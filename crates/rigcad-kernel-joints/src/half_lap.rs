//! Half-lap splice generation.

use rigcad_ir::{Axis, CsgOperation, Dims, Part, PartId, RelTransform, Vec3 as IrVec3};
use rigcad_kernel_frame::{adjust_csg_operations, part_pose};
use rigcad_kernel_math::{vec_from_ir, vec_to_ir, KernelConfig, Point3, Pose, Rot3, Vec3};
use serde::{Deserialize, Serialize};

/// Whether two parts can form a half-lap splice, and along which axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HalfLapCompatibility {
    /// The parts can splice.
    Compatible {
        /// First part's local length axis.
        axis_a: Axis,
        /// Second part's local length axis.
        axis_b: Axis,
        /// True when the cross-sections match with their two extents
        /// swapped rather than directly.
        swapped: bool,
    },
    /// The parts cannot splice.
    Incompatible {
        /// Human-readable explanation for the editor to show.
        reason: String,
    },
}

/// Partial record replacement produced by [`half_lap`].
///
/// Only the fields the joint touches are carried; the editor merges
/// them into the stored part and leaves everything else alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartUpdate {
    /// Part to update.
    pub id: PartId,
    /// New center position.
    pub position: IrVec3,
    /// New extents.
    pub dims: Dims,
    /// Full replacement list of CSG operations.
    pub csg_operations: Vec<CsgOperation>,
}

/// Output of [`half_lap`]: one update per spliced part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalfLapUpdates {
    /// Updates for both parts, first part first.
    pub updates: Vec<PartUpdate>,
}

/// The local axis whose world direction lines up best with `dir`.
fn length_axis(rotation: &Rot3, dir: &Vec3) -> Axis {
    let mut best = Axis::X;
    let mut best_dot = -1.0;
    for axis in Axis::ALL {
        let d = (rotation * vec_from_ir(&axis.unit())).dot(dir).abs();
        if d > best_dot {
            best = axis;
            best_dot = d;
        }
    }
    best
}

/// The two extents perpendicular to `length`, in X, Y, Z order.
fn cross_section(dims: &Dims, length: Axis) -> [f64; 2] {
    let mut out = [0.0; 2];
    let mut n = 0;
    for axis in Axis::ALL {
        if axis != length {
            out[n] = dims.along(axis);
            n += 1;
        }
    }
    out
}

/// Check whether two parts can form a half-lap splice.
///
/// Each part's length axis is the local axis best aligned with the
/// line between the two centers. The splice is possible when the two
/// cross-sections match within tolerance, either directly or with
/// their extents swapped.
pub fn validate_half_lap(a: &Part, b: &Part, cfg: &KernelConfig) -> HalfLapCompatibility {
    for part in [a, b] {
        if !part.pose_is_finite() || !part.dims.is_solid() {
            return HalfLapCompatibility::Incompatible {
                reason: format!("part {} has degenerate geometry", part.id),
            };
        }
    }
    let pose_a = part_pose(a);
    let pose_b = part_pose(b);
    let dir = pose_b.translation - pose_a.translation;
    if dir.norm() < cfg.tolerance.linear {
        return HalfLapCompatibility::Incompatible {
            reason: "parts share the same center".to_string(),
        };
    }
    let dir = dir.normalize();
    let axis_a = length_axis(&pose_a.rotation, &dir);
    let axis_b = length_axis(&pose_b.rotation, &dir);

    let cross_a = cross_section(&a.dims, axis_a);
    let cross_b = cross_section(&b.dims, axis_b);
    let tol = cfg.tolerance;
    let direct =
        tol.lengths_equal(cross_a[0], cross_b[0]) && tol.lengths_equal(cross_a[1], cross_b[1]);
    let swapped =
        tol.lengths_equal(cross_a[0], cross_b[1]) && tol.lengths_equal(cross_a[1], cross_b[0]);
    if direct || swapped {
        HalfLapCompatibility::Compatible {
            axis_a,
            axis_b,
            swapped: !direct && swapped,
        }
    } else {
        HalfLapCompatibility::Incompatible {
            reason: format!(
                "cross-sections {:.1}×{:.1} and {:.1}×{:.1} do not match",
                cross_a[0], cross_a[1], cross_b[0], cross_b[1]
            ),
        }
    }
}

/// Generate a half-lap splice between two bars.
///
/// Both bars are re-extended along their length axes so their near ends
/// meet at the joint center and overlap by `lap_length`; the far ends
/// never move. Over the overlap each bar loses half its height — the
/// first from above, the second from below in their own local frames —
/// so the two seat flush. Existing cutters are re-expressed against the
/// moved centers so their world poses hold.
///
/// Returns `None` when the parts are incompatible (use
/// [`validate_half_lap`] for the reason) or `lap_length` is not a
/// positive finite value.
pub fn half_lap(a: &Part, b: &Part, lap_length: f64, cfg: &KernelConfig) -> Option<HalfLapUpdates> {
    let (axis_a, axis_b) = match validate_half_lap(a, b, cfg) {
        HalfLapCompatibility::Compatible { axis_a, axis_b, .. } => (axis_a, axis_b),
        HalfLapCompatibility::Incompatible { reason } => {
            tracing::debug!("half-lap rejected: {}", reason);
            return None;
        }
    };
    if !lap_length.is_finite() || lap_length <= 0.0 {
        return None;
    }

    let pose_a = part_pose(a);
    let pose_b = part_pose(b);
    let ca = Point3::from(pose_a.translation);
    let cb = Point3::from(pose_b.translation);
    let dir = (cb - ca).normalize();

    // Length directions oriented toward the other part.
    let u_a = oriented_axis(&pose_a.rotation, axis_a, &dir);
    let u_b = oriented_axis(&pose_b.rotation, axis_b, &-dir);

    let near_a = ca + u_a * (a.dims.along(axis_a) / 2.0);
    let near_b = cb + u_b * (b.dims.along(axis_b) / 2.0);
    let joint_center = nalgebra::center(&near_a, &near_b);

    let update_a = splice_update(a, axis_a, &u_a, &joint_center, lap_length, 1.0, cfg)?;
    let update_b = splice_update(b, axis_b, &u_b, &joint_center, lap_length, -1.0, cfg)?;

    Some(HalfLapUpdates {
        updates: vec![update_a, update_b],
    })
}

/// World direction of a local axis, flipped to point along `toward`.
fn oriented_axis(rotation: &Rot3, axis: Axis, toward: &Vec3) -> Vec3 {
    let u = rotation * vec_from_ir(&axis.unit());
    if u.dot(toward) >= 0.0 {
        u
    } else {
        -u
    }
}

/// Re-extend one bar to the joint center and notch it over the lap.
fn splice_update(
    part: &Part,
    length_axis: Axis,
    u: &Vec3,
    joint_center: &Point3,
    lap_length: f64,
    height_side: f64,
    cfg: &KernelConfig,
) -> Option<PartUpdate> {
    let pose = part_pose(part);
    let len = part.dims.along(length_axis);
    let center = Point3::from(pose.translation);
    let far = center - u * (len / 2.0);
    let new_near = joint_center + u * (lap_length / 2.0);
    let new_len = (new_near - far).dot(u);
    if new_len <= cfg.tolerance.linear {
        tracing::warn!("half-lap would erase part {}", part.id);
        return None;
    }

    let new_center = nalgebra::center(&far, &new_near);
    let new_dims = part.dims.with_along(length_axis, new_len);
    let new_pose = Pose::new(new_center.coords, pose.rotation);

    // Notch: over the lap span, remove half the bar's height. The
    // height axis is local Y unless Y is the length axis, then Z.
    let height_axis = if length_axis == Axis::Y { Axis::Z } else { Axis::Y };
    let h = part.dims.along(height_axis);
    let local_joint = new_pose.inverse().apply_point(joint_center);
    let offset = vec_from_ir(&height_axis.unit()) * (height_side * h / 4.0);
    let cutter_pos = local_joint + offset;
    let cutter_dims = new_dims
        .with_along(length_axis, lap_length)
        .with_along(height_axis, h / 2.0);

    let mut shell = part.clone();
    shell.position = vec_to_ir(&new_center.coords);
    shell.dims = new_dims;
    let mut ops = adjust_csg_operations(&shell, &part.position, &part.rotation);
    ops.push(CsgOperation::subtract(
        cutter_dims,
        RelTransform::new(vec_to_ir(&cutter_pos.coords), IrVec3::zero()),
    ));

    Some(PartUpdate {
        id: part.id,
        position: shell.position,
        dims: new_dims,
        csg_operations: ops,
    })
}
