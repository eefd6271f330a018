// extensions/transform.rs
//
// Transform hierarchy: parent-child relationships by EntityId.
// Kept outside Entity/Scene; `propagate` writes world matrices into the scene.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(orbit_id, LocalTransform::new().with_rotation(Vec3::new(0.0, 0.0, tilt)));
//   graph.register_with(planet_id, LocalTransform::new().with_translation(Vec3::X * 14.0));
//   graph.set_parent(planet_id, Some(orbit_id))?;
//   graph.propagate(&mut scene);

use std::collections::HashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::error::{EngineError, Result};

/// Local transform relative to the parent (or world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub translation: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// T · R · S
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.translation)
    }
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Transform hierarchy graph.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent, in registration order.
    roots: Vec<EntityId>,
    /// Set when anything changes, cleared by `propagate`.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity as a root with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    ///
    /// Both entities must already be registered.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> Result<()> {
        if !self.nodes.contains_key(&child) {
            return Err(EngineError::UnknownEntity(child));
        }
        if let Some(p) = parent {
            if !self.nodes.contains_key(&p) {
                return Err(EngineError::UnknownEntity(p));
            }
            if p == child || self.is_ancestor(child, p) {
                return Err(EngineError::HierarchyCycle { child, parent: p });
            }
        }

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
        Ok(())
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut current = self.get_parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.get_parent(p);
        }
        false
    }

    pub fn get_local(&self, id: EntityId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    /// Mutable access to a local transform; marks the graph dirty.
    pub fn get_local_mut(&mut self, id: EntityId) -> Option<&mut LocalTransform> {
        let node = self.nodes.get_mut(&id)?;
        self.dirty = true;
        Some(&mut node.local)
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Remove an entity from the hierarchy. Its children become roots.
    pub fn remove(&mut self, id: EntityId) {
        if let Some(node) = self.nodes.remove(&id) {
            if let Some(parent) = node.parent {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|&c| c != id);
                }
            }
            for child in node.children {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.parent = None;
                }
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
            self.roots.retain(|&r| r != id);
        }
        self.dirty = true;
    }

    /// Propagate transforms from roots down, writing `Entity::world`.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }
        for &root in &self.roots {
            self.propagate_recursive(root, Mat4::IDENTITY, scene);
        }
        self.dirty = false;
    }

    fn propagate_recursive(&self, id: EntityId, parent_world: Mat4, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };
        let world = parent_world * node.local.matrix();

        if let Some(entity) = scene.get_mut(id) {
            entity.world = world;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world, scene);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
