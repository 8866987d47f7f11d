//! Face and connector frames in world space.

use crate::world::part_pose;
use rigcad_ir::{Axis, ConnectorId, Dims, Face, Part};
use rigcad_kernel_math::{vec_from_ir, Dir3, Point3, Rot3, Tolerance, Vec3};

/// World-space frame of one face of a part's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    /// Face center in world space.
    pub center: Point3,
    /// Outward unit normal in world space.
    pub normal: Dir3,
    /// Orientation of the face plane (the owning part's world rotation).
    pub rotation: Rot3,
    /// In-plane extents of the face, ordered by the remaining local
    /// axes: `[h, d]` for X faces, `[w, d]` for Y faces, `[w, h]` for
    /// Z faces.
    pub size: [f64; 2],
}

/// In-plane extents of a face.
fn face_size(dims: &Dims, face: Face) -> [f64; 2] {
    match face.axis() {
        Axis::X => [dims.h, dims.d],
        Axis::Y => [dims.w, dims.d],
        Axis::Z => [dims.w, dims.h],
    }
}

/// Compute the world-space frame of `face` on `part`.
///
/// The part's `position`/`rotation` are taken as world — flatten
/// grouped scenes first. Zero extents are legal (the frame of a
/// zero-thickness face is still well-defined); only non-finite input
/// yields `None`.
pub fn face_frame(part: &Part, face: Face) -> Option<FaceFrame> {
    if !part.pose_is_finite() {
        return None;
    }
    let pose = part_pose(part);
    let half = part.dims.along(face.axis()) / 2.0;
    let local_normal = vec_from_ir(&face.local_normal());
    let center = pose.apply_point(&Point3::from(local_normal * half));
    Some(FaceFrame {
        center,
        normal: Dir3::new_normalize(pose.rotation * local_normal),
        rotation: pose.rotation,
        size: face_size(&part.dims, face),
    })
}

/// World-space frame of a connector socket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorFrame {
    /// Connector position in world space.
    pub center: Point3,
    /// Outward unit normal in world space.
    pub normal: Dir3,
    /// Up reference in world space.
    pub up: Dir3,
    /// Connector position in the owning part's local frame.
    pub local_pos: Vec3,
    /// The owning part's world rotation.
    pub rotation: Rot3,
}

/// Compute the world-space frame of a connector on `part`.
///
/// Returns `None` for an unknown connector ID, non-finite fields, or a
/// zero-length normal or up vector.
pub fn connector_frame(part: &Part, connector: ConnectorId) -> Option<ConnectorFrame> {
    let c = part.connector(connector)?;
    if !part.pose_is_finite() || !c.pos.is_finite() || !c.normal.is_finite() || !c.up.is_finite() {
        return None;
    }
    let tol = Tolerance::DEFAULT;
    let local_normal = vec_from_ir(&c.normal);
    let local_up = vec_from_ir(&c.up);
    if local_normal.norm() < tol.linear || local_up.norm() < tol.linear {
        return None;
    }
    let pose = part_pose(part);
    let local_pos = vec_from_ir(&c.pos);
    Some(ConnectorFrame {
        center: pose.apply_point(&Point3::from(local_pos)),
        normal: Dir3::new_normalize(pose.rotation * local_normal),
        up: Dir3::new_normalize(pose.rotation * local_up),
        local_pos,
        rotation: pose.rotation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigcad_ir::Connector;
    use rigcad_ir::Vec3 as IrVec3;

    #[test]
    fn test_face_centers_sit_on_the_box() {
        let part = Part::block("plate", 50.0, 50.0, 5.0).at(10.0, 0.0, 0.0);
        let top = face_frame(&part, Face::PosY).unwrap();
        assert!((top.center - Point3::new(10.0, 25.0, 0.0)).norm() < 1e-12);
        assert!((top.normal.into_inner() - Vec3::y()).norm() < 1e-12);
        assert_eq!(top.size, [50.0, 5.0]);
    }

    #[test]
    fn test_opposite_faces_mirror() {
        let part = Part::block("bar", 100.0, 10.0, 10.0)
            .at(3.0, 4.0, 5.0)
            .rotated(25.0, -40.0, 10.0);
        for face in Face::ALL {
            let f = face_frame(&part, face).unwrap();
            let o = face_frame(&part, face.opposite()).unwrap();
            // Normals are exact negations.
            assert!((f.normal.into_inner() + o.normal.into_inner()).norm() < 1e-12);
            // Centers are mirrored through the part center.
            let center = Point3::new(3.0, 4.0, 5.0);
            let mid = nalgebra::center(&f.center, &o.center);
            assert!((mid - center).norm() < 1e-12);
            assert_eq!(f.size, o.size);
        }
    }

    #[test]
    fn test_rotated_face_normal() {
        // 90° about Y sends the +X face normal to world -Z.
        let part = Part::block("bar", 100.0, 10.0, 10.0).rotated(0.0, 90.0, 0.0);
        let f = face_frame(&part, Face::PosX).unwrap();
        assert!((f.normal.into_inner() - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
        assert!((f.center - Point3::new(0.0, 0.0, -50.0)).norm() < 1e-12);
    }

    #[test]
    fn test_zero_dims_face_is_well_defined() {
        let part = Part::block("marker", 0.0, 0.0, 0.0).at(1.0, 2.0, 3.0);
        let f = face_frame(&part, Face::PosZ).unwrap();
        assert!((f.center - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
        assert_eq!(f.size, [0.0, 0.0]);
    }

    #[test]
    fn test_non_finite_pose_yields_none() {
        let mut part = Part::block("bad", 10.0, 10.0, 10.0);
        part.position.x = f64::NAN;
        assert!(face_frame(&part, Face::PosX).is_none());
    }

    #[test]
    fn test_connector_frame_world_vectors() {
        let part = Part::block("mobo", 305.0, 3.0, 244.0)
            .at(0.0, 10.0, 0.0)
            .rotated(0.0, 0.0, 90.0)
            .with_connector(Connector::new(
                "pcie_x16",
                IrVec3::new(10.0, 1.5, 0.0),
                IrVec3::new(0.0, 1.0, 0.0),
                IrVec3::new(0.0, 0.0, 1.0),
            ));
        let id = part.connectors[0].id;
        let f = connector_frame(&part, id).unwrap();
        // Rz(90°): local +Y normal becomes world -X.
        assert!((f.normal.into_inner() - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((f.up.into_inner() - Vec3::z()).norm() < 1e-12);
        // Local (10, 1.5, 0) rotates to (-1.5, 10, 0) and offsets by (0, 10, 0).
        assert!((f.center - Point3::new(-1.5, 20.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_unknown_or_degenerate_connector_yields_none() {
        let part = Part::block("plate", 50.0, 50.0, 5.0).with_connector(Connector::new(
            "broken",
            IrVec3::zero(),
            IrVec3::zero(),
            IrVec3::new(0.0, 0.0, 1.0),
        ));
        let id = part.connectors[0].id;
        assert!(connector_frame(&part, id).is_none());
        assert!(connector_frame(&part, 123_456).is_none());
    }
}
