//! Ray picking against scene meshes.
//!
//! Spheres use the analytic ray/sphere test; rings use ray/plane followed by
//! an annulus radius check. All tests run in world space.

use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::mesh::MeshShape;

/// Hits closer than this are treated as self-intersections and ignored.
const T_EPSILON: f32 = 1e-4;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// `direction` is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest positive ray parameter where the ray meets the sphere.
/// A ray starting inside the sphere reports the exit point.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t0 = -b - sq;
    if t0 > T_EPSILON {
        return Some(t0);
    }
    let t1 = -b + sq;
    (t1 > T_EPSILON).then_some(t1)
}

/// Ray parameter where the ray crosses a flat annulus, if it lands between
/// `inner` and `outer` from `center`.
pub fn intersect_ring(ray: &Ray, center: Vec3, normal: Vec3, inner: f32, outer: f32) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t <= T_EPSILON {
        return None;
    }
    let dist = (ray.at(t) - center).length();
    (dist >= inner && dist <= outer).then_some(t)
}

/// Result of a successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: EntityId,
    pub distance: f32,
    pub point: Vec3,
}

/// Ray parameter where `ray` meets `entity`'s mesh, using its world matrix.
pub fn intersect_entity(ray: &Ray, entity: &Entity) -> Option<f32> {
    let mesh = entity.mesh.as_ref()?;
    let center = entity.position();
    let scale = entity.max_scale();
    match mesh.shape {
        MeshShape::Sphere { radius } => intersect_sphere(ray, center, radius * scale),
        MeshShape::Ring { inner, outer } => {
            // Local ring plane is XY, so the world normal is the Z basis.
            let normal = entity.world.z_axis.truncate().normalize_or_zero();
            intersect_ring(ray, center, normal, inner * scale, outer * scale)
        }
    }
}

/// Nearest pickable, active entity hit by `ray`.
pub fn pick<'a>(entities: impl IntoIterator<Item = &'a Entity>, ray: &Ray) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for entity in entities {
        if !entity.active || !entity.pickable {
            continue;
        }
        let Some(t) = intersect_entity(ray, entity) else { continue };
        if best.map_or(true, |b| t < b.distance) {
            best = Some(PickHit {
                id: entity.id,
                distance: t,
                point: ray.at(t),
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{MeshColor, MeshComponent};
    use glam::{Mat4, Quat};
    use std::f32::consts::FRAC_PI_2;

    fn sphere_at(id: u32, pos: Vec3, radius: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_world(Mat4::from_translation(pos))
            .with_mesh(MeshComponent::sphere(radius, MeshColor::WHITE))
            .pickable()
    }

    #[test]
    fn sphere_hit_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let t = intersect_sphere(&ray, Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_miss_and_behind() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 10.0), -Vec3::Z);
        assert!(intersect_sphere(&ray, Vec3::ZERO, 2.0).is_none());

        let away = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(intersect_sphere(&away, Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn sphere_from_inside_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect_sphere(&ray, Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn ring_hits_only_inside_annulus() {
        let down = |x: f32| Ray::new(Vec3::new(x, 10.0, 0.0), -Vec3::Y);
        assert!(intersect_ring(&down(2.0), Vec3::ZERO, Vec3::Y, 1.5, 2.5).is_some());
        assert!(intersect_ring(&down(1.0), Vec3::ZERO, Vec3::Y, 1.5, 2.5).is_none());
        assert!(intersect_ring(&down(3.0), Vec3::ZERO, Vec3::Y, 1.5, 2.5).is_none());
    }

    #[test]
    fn ring_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::X);
        assert!(intersect_ring(&ray, Vec3::ZERO, Vec3::Y, 1.5, 2.5).is_none());
    }

    #[test]
    fn nearest_hit_wins() {
        let near = sphere_at(1, Vec3::new(0.0, 0.0, 5.0), 1.0);
        let far = sphere_at(2, Vec3::ZERO, 3.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z);
        let hit = pick([&far, &near], &ray).unwrap();
        assert_eq!(hit.id, EntityId(1));
        assert!((hit.distance - 14.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-4);
    }

    #[test]
    fn skips_unpickable_and_inactive() {
        let mut hidden = sphere_at(1, Vec3::ZERO, 1.0);
        hidden.active = false;
        let mut decor = sphere_at(2, Vec3::ZERO, 1.0);
        decor.pickable = false;
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        assert!(pick([&hidden, &decor], &ray).is_none());
    }

    #[test]
    fn rotated_ring_entity_uses_world_normal() {
        // Local XY ring tipped by +90° about X lies in the world XZ plane.
        let world = Mat4::from_rotation_translation(Quat::from_rotation_x(FRAC_PI_2), Vec3::new(32.0, 0.0, 0.0));
        let ring = Entity::new(EntityId(7))
            .with_world(world)
            .with_mesh(MeshComponent::ring(1.5, 2.5, MeshColor::WHITE))
            .pickable();
        let ray = Ray::new(Vec3::new(34.0, 10.0, 0.0), -Vec3::Y);
        let hit = pick([&ring], &ray).unwrap();
        assert_eq!(hit.id, EntityId(7));
        assert!((hit.distance - 10.0).abs() < 1e-4);
    }

    #[test]
    fn scaled_sphere_grows_hit_radius() {
        let e = Entity::new(EntityId(1))
            .with_world(Mat4::from_scale(Vec3::splat(2.0)))
            .with_mesh(MeshComponent::sphere(1.0, MeshColor::WHITE))
            .pickable();
        let ray = Ray::new(Vec3::new(1.5, 0.0, 10.0), -Vec3::Z);
        assert!(intersect_entity(&ray, &e).is_some());
    }
}
