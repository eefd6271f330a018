use crate::components::entity::Entity;
use crate::components::mesh::MeshShape;
use crate::renderer::instance::{InstanceBuffer, MeshInstance};

/// Build the instance buffer from a set of entities.
/// Opaque meshes first, translucent meshes after `transparent_split`, so the
/// renderer can draw them in two passes.
pub fn build_instance_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut InstanceBuffer) {
    buffer.clear();

    let mut translucent: Vec<MeshInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }

        let Some(mesh) = &entity.mesh else { continue };

        let (radius, inner) = match mesh.shape {
            MeshShape::Sphere { radius } => (radius, 0.0),
            MeshShape::Ring { inner, outer } => (outer, inner),
        };

        let instance = MeshInstance {
            model: entity.world.to_cols_array(),
            color: [mesh.color.r, mesh.color.g, mesh.color.b, mesh.opacity],
            emissive: mesh.emissive,
            shininess: mesh.shininess,
            shape: mesh.shape.kind(),
            radius,
            inner,
            lit: if mesh.lit { 1.0 } else { 0.0 },
            double_sided: if mesh.double_sided { 1.0 } else { 0.0 },
            entity: entity.id.0 as f32,
        };

        if mesh.opacity < 1.0 {
            translucent.push(instance);
        } else {
            buffer.push(instance);
        }
    }

    buffer.set_transparent_split(buffer.instance_count());
    for inst in translucent {
        buffer.push(inst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::mesh::{MeshColor, MeshComponent};
    use glam::{Mat4, Vec3};

    #[test]
    fn build_buffer_puts_translucent_last() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_mesh(MeshComponent::ring(1.5, 2.5, MeshColor::WHITE).with_opacity(0.6)),
            Entity::new(EntityId(2))
                .with_world(Mat4::from_translation(Vec3::new(14.0, 0.0, 0.0)))
                .with_mesh(MeshComponent::sphere(0.65, MeshColor::hex(0x6b93d6))),
            Entity::new(EntityId(3)),
        ];

        let mut buffer = InstanceBuffer::new();
        build_instance_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 2);
        assert_eq!(buffer.transparent_split, 1);

        let earth = buffer.instances[0];
        assert_eq!(earth.entity, 2.0);
        assert_eq!(earth.model[12], 14.0);
        assert_eq!(earth.radius, 0.65);
        assert_eq!(earth.lit, 1.0);

        let ring = buffer.instances[1];
        assert_eq!(ring.shape, 1.0);
        assert_eq!((ring.inner, ring.radius), (1.5, 2.5));
        assert!((ring.color[3] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn material_terms_are_packed() {
        let entities = vec![
            Entity::new(EntityId(1)).with_mesh(
                MeshComponent::sphere(3.0, MeshColor::hex(0xffff00))
                    .with_emissive(0.5)
                    .with_shininess(12.0),
            ),
            Entity::new(EntityId(2))
                .with_mesh(MeshComponent::sphere(1.0, MeshColor::WHITE).unlit().double_sided()),
        ];
        let mut buffer = InstanceBuffer::new();
        build_instance_buffer(entities.iter(), &mut buffer);

        let glow = buffer.instances[0];
        assert_eq!(glow.emissive, 0.5);
        assert_eq!(glow.shininess, 12.0);
        assert_eq!(glow.lit, 1.0);
        let flat = buffer.instances[1];
        assert_eq!(flat.emissive, 0.0);
        assert_eq!(flat.lit, 0.0);
        assert_eq!(flat.double_sided, 1.0);
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut entity = Entity::new(EntityId(1)).with_mesh(MeshComponent::default());
        entity.active = false;

        let entities = vec![entity];
        let mut buffer = InstanceBuffer::new();
        build_instance_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }
}
