#![warn(missing_docs)]

//! Geometry kernel facade for the rigcad assembly editor.
//!
//! The editor describes an assembly as a flat list of box parts
//! ([`rigcad_ir::Part`]) carrying poses, connectors, and CSG cutters.
//! This crate bundles the routines that read and rewrite those
//! records: face and connector frames, woodworking-style joints,
//! plane splits, connector docking, and drill overlap detection.
//! Every operation is pure: parts go in by reference, new values come
//! back for the editor to fold into its scene.
//!
//! # Example
//!
//! ```
//! use rigcad_ir::{Face, Part};
//! use rigcad_kernel::{calculate_cross_lap, face_transform, KernelConfig};
//!
//! let cfg = KernelConfig::default();
//! let rail = Part::block("rail", 100.0, 10.0, 10.0);
//! let post = Part::block("post", 10.0, 10.0, 100.0);
//!
//! // Where is the rail's top face in world space?
//! let top = face_transform(&rail, Face::PosY).unwrap();
//! assert_eq!(top.center.y, 5.0);
//!
//! // Notch the two bars into each other.
//! let joint = calculate_cross_lap(&rail, &post, 0.5, &cfg).unwrap();
//! assert_eq!(joint.part_a.csg_operations.len(), 1);
//! ```

pub use rigcad_ir;
pub use rigcad_kernel_dock;
pub use rigcad_kernel_drill;
pub use rigcad_kernel_frame;
pub use rigcad_kernel_joints;
pub use rigcad_kernel_math;
pub use rigcad_kernel_split;

// The editor-facing call surface, flattened under one roof.
pub use rigcad_kernel_dock::dock;
pub use rigcad_kernel_drill::{
    drill_candidates as calculate_drill_candidates, snap_to_candidate, HoverFace,
};
pub use rigcad_kernel_frame::{
    adjust_csg_operations, connector_frame as connector_transform, cutter_world_pose,
    face_frame as face_transform, flatten_scene, part_pose, world_pose, ConnectorFrame, FaceFrame,
};
pub use rigcad_kernel_joints::{
    cross_lap as calculate_cross_lap, half_lap as calculate_half_lap,
    mortise_tenon as calculate_mortise_tenon, validate_half_lap as validate_half_lap_compatibility,
    CrossLapResult, HalfLapCompatibility, HalfLapUpdates, JointError, MortiseTenonResult,
    PartUpdate,
};
pub use rigcad_kernel_math::{KernelConfig, Pose, Tolerance};
pub use rigcad_kernel_split::split_by_plane as calculate_split;
