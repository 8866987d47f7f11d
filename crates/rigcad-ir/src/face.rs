//! Symbolic axes and faces of a part's bounding box.

use crate::Vec3;
use serde::{Deserialize, Serialize};

/// One of the three axes of a part's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Local X axis (width).
    X,
    /// Local Y axis (height).
    Y,
    /// Local Z axis (depth).
    Z,
}

impl Axis {
    /// All three axes in declaration order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of this axis (X = 0, Y = 1, Z = 2).
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis in the local frame.
    pub fn unit(&self) -> Vec3 {
        match self {
            Axis::X => Vec3::new(1.0, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, 1.0, 0.0),
            Axis::Z => Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// One of the six faces of a part's box, named by its outward normal
/// in the part's local frame.
///
/// Serializes as the short token used throughout the editor protocol
/// (`"+X"`, `"-X"`, ... `"-Z"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Face whose outward normal is local +X.
    #[serde(rename = "+X")]
    PosX,
    /// Face whose outward normal is local -X.
    #[serde(rename = "-X")]
    NegX,
    /// Face whose outward normal is local +Y.
    #[serde(rename = "+Y")]
    PosY,
    /// Face whose outward normal is local -Y.
    #[serde(rename = "-Y")]
    NegY,
    /// Face whose outward normal is local +Z.
    #[serde(rename = "+Z")]
    PosZ,
    /// Face whose outward normal is local -Z.
    #[serde(rename = "-Z")]
    NegZ,
}

impl Face {
    /// All six faces.
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// The axis this face is perpendicular to.
    pub fn axis(&self) -> Axis {
        match self {
            Face::PosX | Face::NegX => Axis::X,
            Face::PosY | Face::NegY => Axis::Y,
            Face::PosZ | Face::NegZ => Axis::Z,
        }
    }

    /// +1.0 for positive faces, -1.0 for negative faces.
    pub fn sign(&self) -> f64 {
        match self {
            Face::PosX | Face::PosY | Face::PosZ => 1.0,
            Face::NegX | Face::NegY | Face::NegZ => -1.0,
        }
    }

    /// Outward normal of this face in the part's local frame.
    pub fn local_normal(&self) -> Vec3 {
        let mut n = self.axis().unit();
        let s = self.sign();
        n.x *= s;
        n.y *= s;
        n.z *= s;
        n
    }

    /// The face on the opposite side of the box.
    pub fn opposite(&self) -> Face {
        match self {
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }
}
