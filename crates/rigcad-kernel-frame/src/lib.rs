#![warn(missing_docs)]

//! World frames, face frames, and oriented-box overlap for the rigcad
//! kernel.
//!
//! Parts are oriented boxes posed by their records; this crate answers
//! the frame questions every other kernel crate builds on: where is a
//! part, a face, or a connector in world space, how do two oriented
//! boxes overlap, and how does a CSG cutter stay glued to a part whose
//! record pose changed.
//!
//! # Example
//!
//! ```
//! use rigcad_ir::{Face, Part};
//! use rigcad_kernel_frame::face_frame;
//!
//! let plate = Part::block("plate", 50.0, 50.0, 5.0).at(0.0, 10.0, 0.0);
//! let top = face_frame(&plate, Face::PosY).unwrap();
//! assert!((top.center.y - 35.0).abs() < 1e-12);
//! assert_eq!(top.size, [50.0, 5.0]);
//! ```

mod adjust;
mod faces;
mod overlap;
mod world;

pub use adjust::{adjust_csg_operations, cutter_world_pose};
pub use faces::{connector_frame, face_frame, ConnectorFrame, FaceFrame};
pub use overlap::{
    interval_gap, interval_overlap, local_corners, projected_half_extent, touches_plane,
    world_aabb, world_corners, Aabb,
};
pub use world::{flatten_scene, part_pose, world_pose};
