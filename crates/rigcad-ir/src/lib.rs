#![warn(missing_docs)]

//! Data model for the rigcad assembly editor.
//!
//! This crate defines the part records the editor and the geometry
//! kernel exchange. It is purely declarative — no mesh data, just
//! oriented boxes, the CSG edits attached to them, and the connectors
//! they dock by. Evaluation (meshing, booleans) is handled separately
//! by the renderer.
//!
//! All lengths are f64 millimeters. Rotations are Euler angles in
//! degrees, applied as X, then Y, then Z.
//!
//! # Example
//!
//! ```
//! use rigcad_ir::{Part, Scene};
//!
//! let mut scene = Scene::new();
//! let bar = Part::block("strut", 100.0, 10.0, 10.0).at(0.0, 55.0, 0.0);
//! let id = bar.id;
//! scene.upsert(bar);
//!
//! let json = scene.to_json().unwrap();
//! let restored = Scene::from_json(&json).unwrap();
//! assert_eq!(restored.get(id).unwrap().dims.w, 100.0);
//! ```

mod connector;
mod csg;
mod face;
mod part;
mod scene;

pub use connector::{Connector, ConnectorId};
pub use csg::{CsgOpId, CsgOpKind, CsgOperation, RelTransform};
pub use face::{Axis, Face};
pub use part::{alloc_id, Dims, Part, PartId, Vec3};
pub use scene::Scene;
