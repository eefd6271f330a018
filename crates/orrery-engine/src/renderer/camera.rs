use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use crate::error::{EngineError, Result};
use crate::systems::picking::Ray;

/// Perspective camera for 3D rendering.
/// Right-handed, Y-up, depth in [0, 1].
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Viewport size in CSS pixels.
    viewport: Vec2,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = eye position, w = vertical fov in radians.
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_deg.to_radians(),
            near,
            far,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }

    pub fn looking_at(mut self, position: Vec3, target: Vec3) -> Self {
        self.position = position;
        self.target = target;
        self
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<()> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EngineError::InvalidViewport { width, height });
        }
        self.viewport = Vec2::new(width, height);
        Ok(())
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
            position: self.position.extend(self.fov_y).to_array(),
        }
    }

    /// Pixel coordinates (origin top-left) to normalized device coordinates.
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
        )
    }

    /// Project a world point to pixel coordinates.
    /// Returns `None` for points behind the camera.
    pub fn project_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Ray from the eye through the pixel at `screen`.
    pub fn screen_ray(&self, screen: Vec2) -> Ray {
        let ndc = self.screen_to_ndc(screen);
        let inv = self.view_proj().inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - near)
    }

    /// Height in pixels of one world unit at `distance` from the eye.
    pub fn pixels_per_unit(&self, distance: f32) -> f32 {
        if distance <= 0.0 {
            return 0.0;
        }
        self.viewport.y / (2.0 * distance * (self.fov_y * 0.5).tan())
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 0.1, 2500.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::default().looking_at(Vec3::new(0.0, 30.0, 60.0), Vec3::ZERO);
        cam.set_viewport(800.0, 600.0).unwrap();
        cam
    }

    #[test]
    fn target_projects_to_center() {
        let cam = camera();
        let p = cam.project_to_screen(Vec3::ZERO).unwrap();
        assert!((p - Vec2::new(400.0, 300.0)).length() < 1e-2);
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera();
        let ray = cam.screen_ray(Vec2::new(400.0, 300.0));
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((ray.direction - expected).length() < 1e-3);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn ray_passes_through_projected_point() {
        let cam = camera();
        let world = Vec3::new(5.0, 2.0, -3.0);
        let screen = cam.project_to_screen(world).unwrap();
        let ray = cam.screen_ray(screen);
        let to_point = world - ray.origin;
        let off_axis = to_point - ray.direction * to_point.dot(ray.direction);
        assert!(off_axis.length() < 1e-2, "ray misses by {}", off_axis.length());
    }

    #[test]
    fn behind_camera_does_not_project() {
        let cam = camera();
        assert!(cam.project_to_screen(Vec3::new(0.0, 60.0, 120.0)).is_none());
    }

    #[test]
    fn aspect_follows_viewport() {
        let mut cam = camera();
        cam.set_viewport(1000.0, 500.0).unwrap();
        assert!((cam.aspect() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_degenerate_viewport() {
        let mut cam = camera();
        assert!(matches!(
            cam.set_viewport(0.0, 600.0),
            Err(EngineError::InvalidViewport { .. })
        ));
        assert!(cam.set_viewport(f32::NAN, 600.0).is_err());
        assert!((cam.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn uniform_carries_eye() {
        let u = camera().uniform();
        assert_eq!(&u.position[..3], &[0.0, 30.0, 60.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
