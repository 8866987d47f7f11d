//! Connector sockets — the named docking points on a part.

use crate::{alloc_id, Vec3};
use serde::{Deserialize, Serialize};

/// Unique identifier for a connector.
pub type ConnectorId = u64;

/// A docking point on a part, defined in the part's local frame.
///
/// `normal` points outward, away from the part surface; `up`
/// disambiguates rotation about the normal. Two connectors mate with
/// their normals anti-parallel and their ups aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Unique identifier.
    pub id: ConnectorId,
    /// Label shown in the editor (e.g. "pcie_x16", "mount_a").
    pub label: String,
    /// Position in the part's local frame.
    pub pos: Vec3,
    /// Outward normal in the local frame.
    pub normal: Vec3,
    /// Up reference in the local frame.
    pub up: Vec3,
}

impl Connector {
    /// Create a connector with a fresh ID.
    pub fn new(label: &str, pos: Vec3, normal: Vec3, up: Vec3) -> Self {
        Self {
            id: alloc_id(),
            label: label.to_string(),
            pos,
            normal,
            up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_roundtrip() {
        let c = Connector::new(
            "pcie_x16",
            Vec3::new(0.0, 2.0, -30.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let json = serde_json::to_string(&c).unwrap();
        let restored: Connector = serde_json::from_str(&json).unwrap();
        assert_eq!(c, restored);
        assert_eq!(restored.label, "pcie_x16");
    }
}
