#![warn(missing_docs)]

//! Connector docking solver.
//!
//! Docking moves one part so a chosen connector on it mates with a
//! connector on an anchor part: the connector centers coincide, the
//! normals end up anti-parallel, and the up references line up once
//! both are projected onto the mating plane. The anchor never moves.
//!
//! # Example
//!
//! ```
//! use rigcad_ir::{Connector, Part, Vec3};
//! use rigcad_kernel_dock::dock;
//! use rigcad_kernel_math::KernelConfig;
//!
//! let anchor = Part::block("frame", 50.0, 50.0, 10.0).with_connector(Connector::new(
//!     "socket",
//!     Vec3::new(25.0, 0.0, 0.0),
//!     Vec3::new(1.0, 0.0, 0.0),
//!     Vec3::new(0.0, 0.0, 1.0),
//! ));
//! let moving = Part::block("bracket", 30.0, 30.0, 10.0).with_connector(Connector::new(
//!     "plug",
//!     Vec3::new(-15.0, 0.0, 0.0),
//!     Vec3::new(-1.0, 0.0, 0.0),
//!     Vec3::new(0.0, 0.0, 1.0),
//! ));
//!
//! let cfg = KernelConfig::default();
//! let docked = dock(
//!     &moving,
//!     moving.connectors[0].id,
//!     &anchor,
//!     anchor.connectors[0].id,
//!     &cfg,
//! )
//! .unwrap();
//! assert_eq!(docked.position, Vec3::new(40.0, 0.0, 0.0));
//! ```

use rigcad_ir::{ConnectorId, Part};
use rigcad_kernel_frame::connector_frame;
use rigcad_kernel_math::{rot_to_euler_deg, vec_to_ir, Dir3, KernelConfig, Rot3, Vec3};
use std::f64::consts::PI;

/// A unit vector perpendicular to `n`.
fn arbitrary_perpendicular(n: &Vec3) -> Vec3 {
    let pick = if n.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
    n.cross(&pick).normalize()
}

/// Project `v` onto the plane perpendicular to the unit vector `n` and
/// normalize. Falls back to an arbitrary in-plane direction when the
/// projection vanishes (an up vector parallel to the mating normal).
fn project_onto_plane(v: &Vec3, n: &Vec3, cfg: &KernelConfig) -> Vec3 {
    let projected = v - n * v.dot(n);
    let len = projected.norm();
    if len < cfg.tolerance.linear {
        tracing::warn!("connector up is parallel to the mating normal, picking a twist reference");
        arbitrary_perpendicular(n)
    } else {
        projected / len
    }
}

/// Move `moving` so its connector mates with the anchor's connector.
///
/// The solve runs in three steps: a shortest-arc rotation takes the
/// moving connector's world normal onto the negated anchor normal;
/// a twist about the anchor normal lines up the two up references,
/// compared in the mating plane; and the part position is solved so
/// the connector's world position lands exactly on the anchor's. CSG
/// cutters keep their relative transforms, so they ride along with the
/// part.
///
/// Part poses are read as world poses; resolve grouped scenes first.
/// Returns `None` when either connector ID is unknown or a connector
/// carries degenerate vectors.
pub fn dock(
    moving: &Part,
    moving_connector: ConnectorId,
    anchor: &Part,
    anchor_connector: ConnectorId,
    cfg: &KernelConfig,
) -> Option<Part> {
    let mf = connector_frame(moving, moving_connector)?;
    let af = connector_frame(anchor, anchor_connector)?;

    let m_normal = mf.normal.into_inner();
    let a_normal = af.normal.into_inner();
    let target = -a_normal;

    // Shortest arc onto the mating direction. Anti-parallel input has
    // no unique arc, flip about any perpendicular instead.
    let align = Rot3::rotation_between(&m_normal, &target).unwrap_or_else(|| {
        let axis = Dir3::new_normalize(arbitrary_perpendicular(&m_normal));
        Rot3::from_axis_angle(&axis, PI)
    });

    let rotated_up = align * mf.up.into_inner();
    let m_up = project_onto_plane(&rotated_up, &a_normal, cfg);
    let a_up = project_onto_plane(&af.up.into_inner(), &a_normal, cfg);

    let twist_angle = a_normal.dot(&m_up.cross(&a_up)).atan2(m_up.dot(&a_up));
    let twist = Rot3::from_axis_angle(&af.normal, twist_angle);

    let rotation = twist * align * mf.rotation;
    let position = af.center.coords - rotation * mf.local_pos;

    let mut docked = moving.clone();
    docked.position = vec_to_ir(&position);
    docked.rotation = rot_to_euler_deg(&rotation);
    Some(docked)
}
