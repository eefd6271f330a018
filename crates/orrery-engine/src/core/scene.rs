use std::collections::HashMap;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::error::{EngineError, Result};

/// Entity storage in spawn order, with an id index for lookups.
///
/// Spawn order is the draw order the renderer sees. Bodies are never
/// removed once the scene is built, so indices stay stable.
pub struct Scene {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(32),
            index: HashMap::with_capacity(32),
        }
    }

    /// Add an entity. Ids must be unique within the scene.
    pub fn spawn(&mut self, entity: Entity) -> Result<()> {
        if self.index.contains_key(&entity.id) {
            return Err(EngineError::DuplicateEntity(entity.id));
        }
        self.index.insert(entity.id, self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let i = *self.index.get(&id)?;
        self.entities.get_mut(i)
    }

    /// Entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
