//! World-frame resolution for part records and grouped scenes.

use rigcad_ir::{Part, PartId, Scene};
use rigcad_kernel_math::{rot_to_euler_deg, vec_to_ir, Pose};

/// Pose of a part from its own record fields.
///
/// For a root part this is the world pose. For a grouped part it is the
/// pose in the parent's frame — use [`world_pose`] to resolve the full
/// chain.
pub fn part_pose(part: &Part) -> Pose {
    Pose::from_ir(&part.position, &part.rotation)
}

/// World pose of a part, composing the parent chain.
///
/// Returns `None` for an unknown ID, a chain referencing a missing
/// parent, or a cyclic chain. Rotations compose as poses — Euler angle
/// records are never summed component-wise, which would be wrong for
/// any chain with more than one rotated level.
pub fn world_pose(scene: &Scene, id: PartId) -> Option<Pose> {
    let mut current = scene.get(id)?;
    let mut pose = part_pose(current);
    let mut hops = 0usize;
    while let Some(parent_id) = current.parent {
        let parent = match scene.get(parent_id) {
            Some(p) => p,
            None => {
                tracing::warn!("part {} references missing parent {}", current.id, parent_id);
                return None;
            }
        };
        pose = part_pose(parent).compose(&pose);
        current = parent;
        hops += 1;
        if hops > scene.len() {
            tracing::warn!("cyclic parent chain at part {}", id);
            return None;
        }
    }
    Some(pose)
}

/// World-resolved copies of every part, sorted by ID.
///
/// Each copy carries its composed world pose in `position`/`rotation`
/// and has the parent link cleared. Parts whose chains are broken are
/// skipped. This is the input shape the overlap and drill solvers
/// expect.
pub fn flatten_scene(scene: &Scene) -> Vec<Part> {
    let mut out = Vec::with_capacity(scene.len());
    for part in scene.parts.values() {
        if let Some(pose) = world_pose(scene, part.id) {
            let mut flat = part.clone();
            flat.position = vec_to_ir(&pose.translation);
            flat.rotation = rot_to_euler_deg(&pose.rotation);
            flat.parent = None;
            out.push(flat);
        }
    }
    out.sort_by_key(|p| p.id);
    out
}
