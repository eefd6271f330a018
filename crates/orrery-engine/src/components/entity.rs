use glam::{Mat4, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// World transform, written by `TransformGraph::propagate`.
    pub world: Mat4,
    /// Mesh component (optional; entities without meshes are pure groups).
    pub mesh: Option<MeshComponent>,
    /// Whether ray picking considers this entity.
    pub pickable: bool,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            world: Mat4::IDENTITY,
            mesh: None,
            pickable: false,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn pickable(mut self) -> Self {
        self.pickable = true;
        self
    }

    /// World-space position (translation column of the world matrix).
    pub fn position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    /// Largest axis scale of the world matrix, for bounding volumes.
    pub fn max_scale(&self) -> f32 {
        self.world
            .x_axis
            .truncate()
            .length()
            .max(self.world.y_axis.truncate().length())
            .max(self.world.z_axis.truncate().length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_reads_translation() {
        let e = Entity::new(EntityId(1)).with_world(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(e.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn max_scale_picks_largest_axis() {
        let e = Entity::new(EntityId(1)).with_world(Mat4::from_scale(Vec3::new(1.0, 4.0, 2.0)));
        assert!((e.max_scale() - 4.0).abs() < 1e-6);
    }
}
