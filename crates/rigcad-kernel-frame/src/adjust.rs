//! Keeping CSG cutters glued to moved parts.
//!
//! A cutter's pose is stored relative to its owning part, so its world
//! pose is always `owner ∘ relative`. When an edit changes the owner's
//! own pose the stored relative transforms must be re-derived, or every
//! hole and notch drifts with the part.

use crate::world::part_pose;
use rigcad_ir::{CsgOperation, Part, RelTransform, Vec3 as IrVec3};
use rigcad_kernel_math::{rot_to_euler_deg, vec_to_ir, Pose};

/// World pose of a cutter given its owner's world pose.
pub fn cutter_world_pose(owner: &Pose, op: &CsgOperation) -> Pose {
    owner.compose(&Pose::from_ir(
        &op.relative_transform.pos,
        &op.relative_transform.rot,
    ))
}

/// Re-express a part's CSG operations after a pose change.
///
/// `original_position` and `original_rotation` are the record fields
/// the operations were authored against; `part` carries the new pose.
/// Every cutter keeps its ID and its world pose — only the stored
/// relative transform changes.
pub fn adjust_csg_operations(
    part: &Part,
    original_position: &IrVec3,
    original_rotation: &IrVec3,
) -> Vec<CsgOperation> {
    let old_pose = Pose::from_ir(original_position, original_rotation);
    let new_pose = part_pose(part);
    part.csg_operations
        .iter()
        .map(|op| {
            let world = cutter_world_pose(&old_pose, op);
            let rel = world.in_frame(&new_pose);
            let mut out = op.clone();
            out.relative_transform =
                RelTransform::new(vec_to_ir(&rel.translation), rot_to_euler_deg(&rel.rotation));
            out
        })
        .collect()
}
