//! Scene container — every part record in an assembly, keyed by ID.

use crate::{Part, PartId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A rigcad scene — the on-disk and over-the-wire model format.
///
/// The scene is a flat map of part records; grouping is expressed by
/// [`Part::parent`] references, not nesting. Edits happen by whole-record
/// replacement through [`Scene::upsert`], which is what keeps concurrent
/// readers consistent: a record is always either the old value or the new
/// one, never a half-updated mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Format version string (e.g. "0.1").
    pub version: String,
    /// All parts, keyed by [`PartId`].
    pub parts: HashMap<PartId, Part>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            parts: HashMap::new(),
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parts in the scene.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True when the scene holds no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Look up a part by ID.
    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.get(&id)
    }

    /// Insert a part, replacing any existing record with the same ID.
    ///
    /// Returns the replaced record, if any.
    pub fn upsert(&mut self, part: Part) -> Option<Part> {
        self.parts.insert(part.id, part)
    }

    /// Remove a part by ID.
    pub fn remove(&mut self, id: PartId) -> Option<Part> {
        self.parts.remove(&id)
    }

    /// Parts with no parent, sorted by ID.
    pub fn roots(&self) -> Vec<&Part> {
        let mut out: Vec<&Part> = self.parts.values().filter(|p| p.parent.is_none()).collect();
        out.sort_by_key(|p| p.id);
        out
    }

    /// Direct children of the given part, sorted by ID.
    pub fn children(&self, id: PartId) -> Vec<&Part> {
        let mut out: Vec<&Part> = self
            .parts
            .values()
            .filter(|p| p.parent == Some(id))
            .collect();
        out.sort_by_key(|p| p.id);
        out
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn upsert_replaces_whole_record() {
        let mut scene = Scene::new();
        let part = Part::block("bar", 100.0, 10.0, 10.0);
        let id = part.id;
        scene.upsert(part.clone());

        let moved = part.clone().at(5.0, 0.0, 0.0);
        let replaced = scene.upsert(moved);
        assert_eq!(replaced, Some(part));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(id).unwrap().position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn roots_and_children() {
        let mut scene = Scene::new();
        let frame = Part::block("frame", 400.0, 400.0, 20.0);
        let frame_id = frame.id;
        let gpu = Part::block("gpu", 260.0, 40.0, 110.0).child_of(frame_id);
        let gpu_id = gpu.id;
        let loose = Part::block("bar", 100.0, 10.0, 10.0);
        let loose_id = loose.id;
        scene.upsert(frame);
        scene.upsert(gpu);
        scene.upsert(loose);

        let roots: Vec<PartId> = scene.roots().iter().map(|p| p.id).collect();
        assert_eq!(roots, vec![frame_id, loose_id]);
        let kids: Vec<PartId> = scene.children(frame_id).iter().map(|p| p.id).collect();
        assert_eq!(kids, vec![gpu_id]);
        assert!(scene.children(loose_id).is_empty());
    }

    #[test]
    fn roundtrip_scene() {
        let mut scene = Scene::new();
        scene.upsert(
            Part::block("mobo", 305.0, 3.0, 244.0)
                .at(0.0, 50.0, 0.0)
                .rotated(0.0, 0.0, 90.0),
        );
        scene.upsert(Part::block("bar", 100.0, 10.0, 10.0));

        let json = scene.to_json().expect("serialize");
        let restored = Scene::from_json(&json).expect("deserialize");
        assert_eq!(scene, restored);
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn empty_scene() {
        let scene = Scene::new();
        assert_eq!(scene.version, "0.1");
        assert!(scene.is_empty());
        assert!(scene.roots().is_empty());
    }
}
