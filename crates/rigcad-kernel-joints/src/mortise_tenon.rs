//! Mortise-and-tenon joint generation.

use rigcad_ir::{Axis, CsgOperation, Dims, Part, RelTransform};
use rigcad_kernel_frame::{
    adjust_csg_operations, interval_gap, interval_overlap, part_pose, world_corners,
};
use rigcad_kernel_math::{rot_to_euler_deg, vec_from_ir, vec_to_ir, KernelConfig};
use serde::{Deserialize, Serialize};

/// Output of [`mortise_tenon`]: edited copies of both parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortiseTenonResult {
    /// The tenon part, extended into the mortise part.
    pub tenon: Part,
    /// The mortise part, with the pocket cutter appended.
    pub mortise: Part,
}

/// Interval spanned by a set of coordinates.
#[derive(Debug, Clone, Copy)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Generate a mortise-and-tenon joint.
///
/// The tenon grows by `insertion_depth` along the local axis that faces
/// the mortise part, keeping its far face fixed; the mortise gains a
/// subtract pocket shaped like the grown tenon plus `clearance` per
/// side. The insertion axis is the tenon-local axis with the smallest
/// positive gap to the mortise box, falling back to the smallest
/// overlap when the boxes already interpenetrate; ties resolve in X,
/// Y, Z order.
///
/// Returns `None` for non-finite poses, empty dims, or a non-positive
/// depth or negative clearance.
pub fn mortise_tenon(
    tenon: &Part,
    mortise: &Part,
    insertion_depth: f64,
    clearance: f64,
    cfg: &KernelConfig,
) -> Option<MortiseTenonResult> {
    if !tenon.pose_is_finite() || !mortise.pose_is_finite() {
        return None;
    }
    if !tenon.dims.is_solid() || !mortise.dims.is_solid() {
        return None;
    }
    if !insertion_depth.is_finite() || insertion_depth <= 0.0 {
        return None;
    }
    if !clearance.is_finite() || clearance < 0.0 {
        return None;
    }

    let tenon_pose = part_pose(tenon);
    let mortise_pose = part_pose(mortise);

    // Mortise corners measured in the tenon's frame; only the relative
    // orientation of the two parts matters from here on.
    let into_tenon = tenon_pose.inverse();
    let corners = world_corners(&mortise_pose, &mortise.dims);
    let mut spans = [Span {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    }; 3];
    for corner in &corners {
        let local = into_tenon.apply_point(corner);
        for (i, span) in spans.iter_mut().enumerate() {
            span.min = span.min.min(local[i]);
            span.max = span.max.max(local[i]);
        }
    }

    let (axis, sign) = insertion_axis(&tenon.dims, &spans, cfg.tolerance.linear);
    tracing::debug!(
        "mortise-tenon: tenon {} extends along local {:?}{}",
        tenon.id,
        axis,
        if sign > 0.0 { "+" } else { "-" }
    );

    // Grow the tenon toward the mortise, keeping the far face fixed.
    let new_dims = tenon
        .dims
        .with_along(axis, tenon.dims.along(axis) + insertion_depth);
    let local_shift = vec_from_ir(&axis.unit()) * (sign * insertion_depth / 2.0);
    let world_shift = tenon_pose.apply_vec(&local_shift);

    let mut new_tenon = tenon.clone();
    new_tenon.dims = new_dims;
    new_tenon.position = vec_to_ir(&(vec_from_ir(&tenon.position) + world_shift));
    new_tenon.csg_operations =
        adjust_csg_operations(&new_tenon, &tenon.position, &tenon.rotation);

    // Pocket: the grown tenon plus clearance on every side, posed in
    // the mortise's frame.
    let pocket_dims = Dims::new(
        new_dims.w + 2.0 * clearance,
        new_dims.h + 2.0 * clearance,
        new_dims.d + 2.0 * clearance,
    );
    let new_tenon_pose = part_pose(&new_tenon);
    let rel = new_tenon_pose.in_frame(&mortise_pose);
    let pocket = CsgOperation::subtract(
        pocket_dims,
        RelTransform::new(vec_to_ir(&rel.translation), rot_to_euler_deg(&rel.rotation)),
    );

    let mut new_mortise = mortise.clone();
    new_mortise.csg_operations.push(pocket);

    Some(MortiseTenonResult {
        tenon: new_tenon,
        mortise: new_mortise,
    })
}

/// Pick the tenon-local axis (and direction) that faces the mortise.
///
/// Smallest positive gap wins; if every axis already overlaps, the
/// smallest overlap wins. Strict comparison keeps the earliest axis on
/// ties, so coincident boxes resolve to X. Gaps below `tol` count as
/// contact, not separation.
fn insertion_axis(tenon_dims: &Dims, spans: &[Span; 3], tol: f64) -> (Axis, f64) {
    let mut best_gap: Option<(Axis, f64)> = None;
    let mut best_overlap: Option<(Axis, f64)> = None;
    for axis in Axis::ALL {
        let half = tenon_dims.along(axis) / 2.0;
        let span = spans[axis.index()];
        let gap = interval_gap(half, span.min, span.max);
        if gap > tol {
            if best_gap.map_or(true, |(_, g)| gap < g) {
                best_gap = Some((axis, gap));
            }
        } else {
            let overlap = interval_overlap(half, span.min, span.max);
            if best_overlap.map_or(true, |(_, o)| overlap < o) {
                best_overlap = Some((axis, overlap));
            }
        }
    }
    let (axis, _) = best_gap.or(best_overlap).unwrap_or((Axis::X, 0.0));
    let sign = if spans[axis.index()].center() >= 0.0 {
        1.0
    } else {
        -1.0
    };
    (axis, sign)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigcad_ir::CsgOpKind;
    use rigcad_kernel_frame::cutter_world_pose;

    fn cfg() -> KernelConfig {
        KernelConfig::default()
    }

    #[test]
    fn test_tenon_extends_toward_separated_mortise() {
        // Bar pointing +X at a cube 60 mm away along X.
        let tenon = Part::block("bar", 100.0, 10.0, 10.0);
        let mortise = Part::block("post", 10.0, 10.0, 10.0).at(60.0, 0.0, 0.0);
        let result = mortise_tenon(&tenon, &mortise, 8.0, 0.25, &cfg()).unwrap();

        // Tenon grew along X, far face fixed at x = -50.
        assert!((result.tenon.dims.w - 108.0).abs() < 1e-9);
        assert!((result.tenon.position.x - 4.0).abs() < 1e-9);
        assert!((result.tenon.dims.h - 10.0).abs() < 1e-9);

        // Pocket matches the grown tenon plus clearance per side.
        let pocket = &result.mortise.csg_operations[0];
        assert_eq!(pocket.op, CsgOpKind::Subtract);
        assert!((pocket.dims.w - 108.5).abs() < 1e-9);
        assert!((pocket.dims.h - 10.5).abs() < 1e-9);
        // Pocket center, in mortise-local space, sits at the new tenon
        // center: 4 - 60 = -56 along X.
        assert!((pocket.relative_transform.pos.x + 56.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_side_mortise_flips_direction() {
        let tenon = Part::block("bar", 100.0, 10.0, 10.0);
        let mortise = Part::block("post", 10.0, 10.0, 10.0).at(-60.0, 0.0, 0.0);
        let result = mortise_tenon(&tenon, &mortise, 8.0, 0.0, &cfg()).unwrap();
        assert!((result.tenon.dims.w - 108.0).abs() < 1e-9);
        assert!((result.tenon.position.x + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_stacked_plates_extend_along_the_thin_overlap() {
        // Plates interpenetrate 1 mm on Z and 50 mm on X and Y, so the
        // smallest overlap picks Z as the insertion axis.
        let tenon = Part::block("lower", 50.0, 50.0, 5.0);
        let mortise = Part::block("upper", 50.0, 50.0, 5.0).at(0.0, 0.0, 4.0);
        let result = mortise_tenon(&tenon, &mortise, 8.0, 0.0, &cfg()).unwrap();

        assert!((result.tenon.dims.d - 13.0).abs() < 1e-9);
        assert!((result.tenon.dims.w - 50.0).abs() < 1e-9);
        assert!((result.tenon.dims.h - 50.0).abs() < 1e-9);
        // Far face stays at z = -2.5; the center moves up half the depth.
        assert!((result.tenon.position.z - 4.0).abs() < 1e-9);
        assert!(result.tenon.position.x.abs() < 1e-9);
    }

    #[test]
    fn test_coincident_boxes_tie_break_to_x() {
        let tenon = Part::block("a", 10.0, 10.0, 10.0);
        let mortise = Part::block("b", 10.0, 10.0, 10.0);
        let result = mortise_tenon(&tenon, &mortise, 4.0, 0.0, &cfg()).unwrap();
        assert!((result.tenon.dims.w - 14.0).abs() < 1e-9);
        assert!((result.tenon.dims.h - 10.0).abs() < 1e-9);
        assert!((result.tenon.dims.d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotated_mortise_is_measured_in_tenon_frame() {
        // Mortise sits along the tenon's local +X even though both are
        // rotated in world space.
        let tenon = Part::block("bar", 100.0, 10.0, 10.0).rotated(0.0, 0.0, 90.0);
        // Tenon local +X points along world +Y.
        let mortise = Part::block("post", 10.0, 10.0, 10.0)
            .at(0.0, 60.0, 0.0)
            .rotated(0.0, 0.0, 90.0);
        let result = mortise_tenon(&tenon, &mortise, 8.0, 0.0, &cfg()).unwrap();
        assert!((result.tenon.dims.w - 108.0).abs() < 1e-9);
        // Center shifts along world +Y.
        assert!(result.tenon.position.x.abs() < 1e-9);
        assert!((result.tenon.position.y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_existing_tenon_cutters_stay_glued() {
        let mut tenon = Part::block("bar", 100.0, 10.0, 10.0);
        tenon.csg_operations.push(CsgOperation::subtract(
            Dims::new(4.0, 12.0, 4.0),
            RelTransform::new(rigcad_ir::Vec3::new(-30.0, 0.0, 0.0), rigcad_ir::Vec3::zero()),
        ));
        let before = cutter_world_pose(&part_pose(&tenon), &tenon.csg_operations[0]);

        let mortise = Part::block("post", 10.0, 10.0, 10.0).at(60.0, 0.0, 0.0);
        let result = mortise_tenon(&tenon, &mortise, 8.0, 0.0, &cfg()).unwrap();

        let after = cutter_world_pose(
            &part_pose(&result.tenon),
            &result.tenon.csg_operations[0],
        );
        assert!((after.translation - before.translation).norm() < 1e-9);
    }

    #[test]
    fn test_degenerate_input_yields_none() {
        let tenon = Part::block("bar", 100.0, 10.0, 10.0);
        let flat = Part::block("flat", 10.0, 0.0, 10.0);
        assert!(mortise_tenon(&tenon, &flat, 8.0, 0.0, &cfg()).is_none());
        assert!(mortise_tenon(&tenon, &tenon, 0.0, 0.0, &cfg()).is_none());
        assert!(mortise_tenon(&tenon, &tenon, 8.0, -1.0, &cfg()).is_none());
        let mut nan = Part::block("nan", 10.0, 10.0, 10.0);
        nan.position.z = f64::NAN;
        assert!(mortise_tenon(&tenon, &nan, 8.0, 0.0, &cfg()).is_none());
    }
}
