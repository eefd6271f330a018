use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Line vertex: position + RGBA. Pairs of vertices form segments.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 7;

    pub fn new(p: Vec3, color: [f32; 4]) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            r: color[0],
            g: color[1],
            b: color[2],
            a: color[3],
        }
    }
}

/// Static line geometry (segment list) in world space.
#[derive(Debug, Default)]
pub struct LineBuffer {
    vertices: Vec<LineVertex>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        self.vertices.push(LineVertex::new(a, color));
        self.vertices.push(LineVertex::new(b, color));
    }

    /// Closed polyline through `points` (last joins first).
    pub fn push_loop(&mut self, points: &[Vec3], color: [f32; 4]) {
        if points.len() < 2 {
            return;
        }
        for (i, &p) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            self.push_segment(p, next, color);
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_closes() {
        let mut lines = LineBuffer::new();
        let pts = [Vec3::ZERO, Vec3::X, Vec3::Y];
        lines.push_loop(&pts, [1.0, 1.0, 1.0, 0.3]);
        assert_eq!(lines.vertex_count(), 6);
        let last = lines.vertices()[5];
        assert_eq!((last.x, last.y, last.z), (0.0, 0.0, 0.0));
    }

    #[test]
    fn degenerate_loop_is_skipped() {
        let mut lines = LineBuffer::new();
        lines.push_loop(&[Vec3::ONE], [1.0; 4]);
        assert_eq!(lines.vertex_count(), 0);
    }

    #[test]
    fn line_vertex_is_7_floats() {
        assert_eq!(std::mem::size_of::<LineVertex>(), LineVertex::FLOATS * 4);
    }
}
