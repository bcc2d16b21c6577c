// Boundary to the host's retained-mode scene graph

use crate::math::to_cols_array;
use crate::skeleton::{Primitive, SegmentId};
use nalgebra_glm as glm;
use serde::Serialize;
use std::collections::BTreeMap;

/// What the figure needs from a scene graph.
/// Rendering, cameras and picking stay on the host side.
pub trait SceneGraph {
    fn add_renderable(&mut self, segment: SegmentId, primitive: Primitive);
    fn set_transform(&mut self, segment: SegmentId, world: &glm::DMat4);
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEntry {
    pub primitive: Primitive,
    /// Column-major world transform
    pub world: [[f64; 4]; 4],
    /// How many times the transform was set
    pub updates: u64,
}

/// In-memory scene that just remembers the latest transforms
#[derive(Debug, Clone, Default, Serialize)]
pub struct SceneSnapshot {
    pub entries: BTreeMap<SegmentId, SnapshotEntry>,
}

impl SceneSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, segment: SegmentId) -> Option<&SnapshotEntry> {
        self.entries.get(&segment)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SceneGraph for SceneSnapshot {
    fn add_renderable(&mut self, segment: SegmentId, primitive: Primitive) {
        self.entries.insert(
            segment,
            SnapshotEntry {
                primitive,
                world: to_cols_array(&glm::identity()),
                updates: 0,
            },
        );
    }

    fn set_transform(&mut self, segment: SegmentId, world: &glm::DMat4) {
        match self.entries.get_mut(&segment) {
            Some(entry) => {
                entry.world = to_cols_array(world);
                entry.updates += 1;
            }
            None => log::warn!("Transform for {segment} has no renderable; ignored"),
        }
    }
}
