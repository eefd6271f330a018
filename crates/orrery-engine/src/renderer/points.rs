use glam::Vec3;
use crate::core::rng::Rng;

/// Uniformly sized, uniformly colored point cloud (xyz triples).
#[derive(Debug, Clone)]
pub struct PointBuffer {
    positions: Vec<f32>,
    /// Point size in world units.
    pub size: f32,
    pub color: [f32; 3],
}

impl PointBuffer {
    pub fn new(size: f32, color: [f32; 3]) -> Self {
        Self {
            positions: Vec::new(),
            size,
            color,
        }
    }

    /// `count` points uniformly distributed in the cube `[-half_extent, half_extent]³`.
    pub fn scatter_cube(&mut self, count: usize, half_extent: f32, rng: &mut Rng) {
        self.positions.reserve(count * 3);
        for _ in 0..count * 3 {
            self.positions.push(rng.range(-half_extent, half_extent));
        }
    }

    pub fn push(&mut self, p: Vec3) {
        self.positions.extend_from_slice(&[p.x, p.y, p.z]);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn point_count(&self) -> u32 {
        (self.positions.len() / 3) as u32
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }
}

impl Default for PointBuffer {
    fn default() -> Self {
        Self::new(1.0, [1.0, 1.0, 1.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_is_bounded_and_seeded() {
        let mut a = PointBuffer::new(0.5, [1.0; 3]);
        let mut b = PointBuffer::new(0.5, [1.0; 3]);
        a.scatter_cube(500, 1000.0, &mut Rng::new(9));
        b.scatter_cube(500, 1000.0, &mut Rng::new(9));
        assert_eq!(a.point_count(), 500);
        assert_eq!(a.positions(), b.positions());
        assert!(a.positions().iter().all(|v| v.abs() <= 1000.0));
    }

    #[test]
    fn push_adds_one_point() {
        let mut p = PointBuffer::default();
        p.push(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.point_count(), 1);
        assert_eq!(p.positions(), &[1.0, 2.0, 3.0]);
    }
}
