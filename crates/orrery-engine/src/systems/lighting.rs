//! Scene lighting: point lights plus an ambient term.
//!
//! Lights are added once during scene setup and persist for the session.
//! Each frame `pack_frame` copies the active lights into the frame buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Falloff distance in world units (0 = infinite).
    pub range: f32,
}

impl PointLight {
    /// Create a new point light at the given position.
    ///
    /// - `pos`: World-space position
    /// - `color`: RGB color
    /// - `intensity`: Light strength multiplier
    /// - `range`: Distance at which the light fades out
    pub fn new(pos: Vec3, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            range,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Manages active lights and ambient color for the scene.
///
/// The ambient color defaults to white, which renders lit meshes at full
/// color when no lights are present.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: [f32; 3],
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a LightState with a specific light capacity.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: [1.0, 1.0, 1.0],
        }
    }

    /// Add a point light to the scene.
    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Number of active lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set the ambient light color, already multiplied by its intensity.
    pub fn set_ambient(&mut self, r: f32, g: f32, b: f32) {
        self.ambient = [r, g, b];
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::LIGHT_FLOATS;

    #[test]
    fn point_light_new() {
        let light = PointLight::new(Vec3::new(1.0, 2.0, 3.0), [1.0, 0.5, 0.0], 2.0, 500.0);
        assert_eq!(light.pos(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.g, 0.5);
        assert_eq!(light.intensity, 2.0);
        assert_eq!(light.range, 500.0);
    }

    #[test]
    fn light_state_add_and_iterate() {
        let mut state = LightState::new();
        assert_eq!(state.count(), 0);
        state.add(PointLight::new(Vec3::ZERO, [1.0; 3], 2.0, 500.0));
        state.add(PointLight::new(Vec3::X, [1.0; 3], 1.0, 0.0));
        assert_eq!(state.count(), 2);
        let xs: Vec<f32> = state.iter().map(|l| l.x).collect();
        assert_eq!(xs, vec![0.0, 1.0]);
    }

    #[test]
    fn light_state_ambient() {
        let mut state = LightState::new();
        assert_eq!(state.ambient(), [1.0, 1.0, 1.0]);
        state.set_ambient(0.05, 0.05, 0.05);
        assert_eq!(state.ambient(), [0.05, 0.05, 0.05]);
    }

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), LIGHT_FLOATS * 4);
    }
}
