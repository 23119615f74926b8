use std::collections::HashMap;

use crate::api::types::{BodyId, NodeId};
use crate::components::body::BodyKind;

/// Everything the simulation knows about one body, in one place.
#[derive(Debug, Clone)]
pub struct BodyHandle {
    /// Stable identifier from the catalog.
    pub name: String,
    pub kind: BodyKind,
    /// Body this one orbits (`None` for the star, planets and comets).
    pub parent: Option<BodyId>,
    /// Revolution frame, absent for the star and comets.
    pub pivot: Option<NodeId>,
    pub node: NodeId,
    pub hitbox: NodeId,
    pub highlight: NodeId,
    /// Pivot yaw speed before the global rate constant.
    pub orbit_speed: f32,
    pub visual_radius: f32,
    /// Offset from the pivot origin (scene units).
    pub orbit_distance: f32,
}

/// Id-keyed table of bodies.
#[derive(Debug, Default, Clone)]
pub struct BodyRegistry {
    bodies: Vec<BodyHandle>,
    by_name: HashMap<String, BodyId>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body. A duplicate name replaces the lookup entry; the old
    /// handle stays addressable by its `BodyId`.
    pub fn insert(&mut self, handle: BodyHandle) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        if self.by_name.insert(handle.name.clone(), id).is_some() {
            log::warn!("duplicate body id '{}', later entry wins lookups", handle.name);
        }
        self.bodies.push(handle);
        id
    }

    /// Id the next inserted body will receive.
    pub fn next_id(&self) -> BodyId {
        BodyId(self.bodies.len() as u32)
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyHandle> {
        self.bodies.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&BodyHandle> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyHandle)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (BodyId(i as u32), b))
    }

    /// Moons of `parent`, in descriptor order.
    pub fn moons_of(&self, parent: BodyId) -> impl Iterator<Item = (BodyId, &BodyHandle)> {
        self.iter()
            .filter(move |(_, b)| b.parent == Some(parent) && b.kind == BodyKind::Moon)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
