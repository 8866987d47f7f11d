#![warn(missing_docs)]

//! Drill overlap solver.
//!
//! While the user hovers a face with the drill tool, the editor wants
//! to know where other parts sit behind that face, so the cursor can
//! snap to spots where a hole would also pass through them. For every
//! other part that reaches into the drill path, the solver reports one
//! candidate point: the center of the overlap between that part's
//! shadow on the hovered face and the face itself.

use rigcad_ir::{Axis, Face, Part, PartId};
use rigcad_kernel_frame::{face_frame, part_pose, touches_plane, world_corners};
use rigcad_kernel_math::{vec_from_ir, KernelConfig, Point2, Point3, Rot3, Vec3};

/// The face currently under the drill cursor.
///
/// Bundles everything the interaction layer knows from its hover
/// raycast; [`HoverFace::from_part`] fills it from a part directly.
#[derive(Debug, Clone)]
pub struct HoverFace {
    /// Owning part.
    pub part_id: PartId,
    /// Which of the six box faces is hovered.
    pub face: Face,
    /// Face center in world space.
    pub center: Point3,
    /// The owning part's world rotation.
    pub rotation: Rot3,
    /// In-plane face size.
    pub size: [f64; 2],
}

impl HoverFace {
    /// Build a hover record straight from a part and face token.
    pub fn from_part(part: &Part, face: Face) -> Option<Self> {
        let frame = face_frame(part, face)?;
        Some(Self {
            part_id: part.id,
            face,
            center: frame.center,
            rotation: frame.rotation,
            size: frame.size,
        })
    }

    /// World outward normal of the hovered face.
    pub fn normal(&self) -> Vec3 {
        self.rotation * vec_from_ir(&self.face.local_normal())
    }
}

/// Axis-aligned rectangle in the face's 2D frame.
#[derive(Debug, Clone, Copy)]
struct Rect {
    min: Point2,
    max: Point2,
}

impl Rect {
    fn bounds(points: &[Point2]) -> Rect {
        let mut min = points[0];
        let mut max = points[0];
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Rect { min, max }
    }

    /// Positive-area intersection, or `None`.
    fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = Point2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point2::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if max.x > min.x && max.y > min.y {
            Some(Rect { min, max })
        } else {
            None
        }
    }

    fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// A unit vector perpendicular to `n`.
fn arbitrary_perpendicular(n: &Vec3) -> Vec3 {
    let pick = if n.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
    n.cross(&pick).normalize()
}

/// 2D coordinates of `p` in the frame spanned by `right` and `up`
/// around `origin`.
fn project(p: &Point3, origin: &Point3, right: &Vec3, up: &Vec3) -> Point2 {
    let d = p - origin;
    Point2::new(d.dot(right), d.dot(up))
}

/// The hovered face's 4 corners in world space.
fn face_corners(hover: &HoverFace) -> [Point3; 4] {
    let axis = hover.face.axis();
    let mut tangents = [Axis::X; 2];
    let mut n = 0;
    for candidate in Axis::ALL {
        if candidate != axis {
            tangents[n] = candidate;
            n += 1;
        }
    }
    let t0 = hover.rotation * vec_from_ir(&tangents[0].unit()) * (hover.size[0] / 2.0);
    let t1 = hover.rotation * vec_from_ir(&tangents[1].unit()) * (hover.size[1] / 2.0);
    [
        hover.center + t0 + t1,
        hover.center + t0 - t1,
        hover.center - t0 + t1,
        hover.center - t0 - t1,
    ]
}

/// Find the points on the hovered face where a drill hole would also
/// pass through other parts.
///
/// `parts` is the flattened scene, hovered part included. Parts are
/// first rejected by a slab test over the drill path (from the hovered
/// face through to its opposite, widened by `cfg.slab_margin`);
/// survivors have their corners projected onto the face, and every
/// positive-area overlap between a projected bounding rectangle and
/// the face outline yields one candidate at its center.
///
/// The 2D frame is derived from the face normal alone, so the result
/// does not depend on how the owning part's rotation is parameterized.
pub fn drill_candidates(hover: &HoverFace, parts: &[Part], cfg: &KernelConfig) -> Vec<Point3> {
    let owner = match parts.iter().find(|p| p.id == hover.part_id) {
        Some(part) => part,
        None => {
            tracing::warn!("hovered part {} is not in the part list", hover.part_id);
            return Vec::new();
        }
    };
    let normal = hover.normal();
    let depth = owner.dims.along(hover.face.axis());
    // One plane through the middle of the drill path, with the margin
    // widened by half the depth, covers the whole slab.
    let mid = hover.center - normal * (depth / 2.0);
    let margin = depth / 2.0 + cfg.slab_margin;

    let right = arbitrary_perpendicular(&normal);
    let up = normal.cross(&right);
    let outline = face_corners(hover).map(|p| project(&p, &hover.center, &right, &up));
    let face_rect = Rect::bounds(&outline);

    let mut candidates = Vec::new();
    for part in parts {
        if part.id == hover.part_id {
            continue;
        }
        if !part.pose_is_finite() || !part.dims.is_finite() {
            continue;
        }
        if !touches_plane(part, &mid, &normal, margin) {
            continue;
        }
        let pose = part_pose(part);
        let shadow = world_corners(&pose, &part.dims)
            .map(|p| project(&p, &hover.center, &right, &up));
        let rect = Rect::bounds(&shadow);
        if let Some(hit) = face_rect.intersection(&rect) {
            let c = hit.center();
            candidates.push(hover.center + right * c.x + up * c.y);
        }
    }
    candidates
}

/// Snap a cursor position to the nearest candidate within `threshold`,
/// or `None` to leave the cursor free.
pub fn snap_to_candidate(
    point: &Point3,
    candidates: &[Point3],
    threshold: f64,
) -> Option<Point3> {
    candidates
        .iter()
        .map(|c| ((c - point).norm(), c))
        .filter(|(d, _)| *d <= threshold)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| *c)
}
