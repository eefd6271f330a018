// extensions/orbit.rs
//
// Damped orbit camera controls: drag to rotate around a target, wheel to
// dolly, plus eased programmatic focus and reset transitions.
//
// Usage:
//   let mut controls = OrbitControls::new(&config.controls, &camera);
//   controls.rotate(dx, dy, viewport_height);
//   controls.focus(body_pos, body_radius);
//   controls.follow(body_pos);            // every tick while focused
//   controls.update(&mut camera, dt);

use std::f32::consts::{PI, TAU};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use super::easing::{lerp, lerp_vec3, Easing};
use crate::renderer::camera::PerspectiveCamera;

/// Tunables for `OrbitControls`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Fraction of the pending rotation applied per update.
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians, measured from +Y.
    pub min_polar: f32,
    pub max_polar: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Seconds for focus and reset transitions.
    pub transition_secs: f32,
    /// Focus distance as a multiple of the focused body's radius.
    pub focus_radius_factor: f32,
    pub transition_easing: Easing,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping: 0.05,
            min_distance: 5.0,
            max_distance: 100.0,
            min_polar: 0.01,
            max_polar: PI - 0.01,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            transition_secs: 1.2,
            focus_radius_factor: 6.0,
            transition_easing: Easing::CubicInOut,
        }
    }
}

/// Camera offset from the target in spherical coordinates.
/// `theta` is the azimuth around +Y from +Z, `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius, theta: 0.0, phi: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(s * self.theta.sin(), self.phi.cos() * self.radius, s * self.theta.cos())
    }
}

#[derive(Debug, Clone)]
struct Transition {
    from_target: Vec3,
    from_radius: f32,
    from_angles: (f32, f32),
    to_radius: Option<f32>,
    to_angles: Option<(f32, f32)>,
    elapsed: f32,
    duration: f32,
}

/// Shortest signed angular difference `to - from`.
fn wrap_delta(from: f32, to: f32) -> f32 {
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Orbit-style camera controller.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    config: ControlsConfig,
    target: Vec3,
    spherical: Spherical,
    /// Rotation still to be applied, drained by `damping` each update.
    pending_theta: f32,
    pending_phi: f32,
    /// Dolly factor accumulated since the last update.
    scale: f32,
    /// Where the target is heading: the home target or the followed body.
    goal_target: Vec3,
    following: bool,
    transition: Option<Transition>,
    home_target: Vec3,
    home: Spherical,
}

impl OrbitControls {
    /// Controls starting from the camera's current position and target.
    pub fn new(config: &ControlsConfig, camera: &PerspectiveCamera) -> Self {
        let mut spherical = Spherical::from_offset(camera.position - camera.target);
        spherical.radius = spherical.radius.clamp(config.min_distance, config.max_distance);
        Self {
            enabled: true,
            config: config.clone(),
            target: camera.target,
            spherical,
            pending_theta: 0.0,
            pending_phi: 0.0,
            scale: 1.0,
            goal_target: camera.target,
            following: false,
            transition: None,
            home_target: camera.target,
            home: spherical,
        }
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Queue a rotation from a pointer drag of `(dx, dy)` pixels.
    /// A full viewport height of drag turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        let k = TAU / viewport_height * self.config.rotate_speed;
        self.pending_theta -= dx * k;
        self.pending_phi -= dy * k;
        // Manual rotation wins over any scripted angle change.
        if let Some(t) = &mut self.transition {
            t.to_angles = None;
        }
    }

    /// Dolly from a wheel event. Negative `delta_y` moves closer.
    pub fn zoom(&mut self, delta_y: f32) {
        if !self.enabled || delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let step = 0.95_f32.powf(self.config.zoom_speed * (delta_y * 0.01).abs());
        if delta_y < 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
        if let Some(t) = &mut self.transition {
            t.to_radius = None;
        }
    }

    fn start_transition(&mut self, to_radius: Option<f32>, to_angles: Option<(f32, f32)>) {
        self.transition = Some(Transition {
            from_target: self.target,
            from_radius: self.spherical.radius,
            from_angles: (self.spherical.theta, self.spherical.phi),
            to_radius,
            to_angles,
            elapsed: 0.0,
            duration: self.config.transition_secs.max(0.0),
        });
    }

    /// Ease the target onto `center` and frame a body of `radius`.
    /// The target keeps following the body via `follow` afterwards.
    pub fn focus(&mut self, center: Vec3, radius: f32) {
        let distance = (radius * self.config.focus_radius_factor)
            .clamp(self.config.min_distance, self.config.max_distance);
        self.goal_target = center;
        self.following = true;
        self.start_transition(Some(distance), None);
    }

    /// Update the followed body's position. Ignored when not focused.
    pub fn follow(&mut self, center: Vec3) {
        if self.following {
            self.goal_target = center;
        }
    }

    /// Drop focus and ease back to the starting view.
    pub fn reset(&mut self) {
        self.following = false;
        self.goal_target = self.home_target;
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.scale = 1.0;
        self.start_transition(Some(self.home.radius), Some((self.home.theta, self.home.phi)));
    }

    /// Stop following without moving the camera.
    /// A reset already under way keeps easing home.
    pub fn release(&mut self) {
        if !self.following {
            return;
        }
        self.following = false;
        self.goal_target = self.target;
        self.transition = None;
    }

    /// Advance one tick and write the result into `camera`.
    pub fn update(&mut self, camera: &mut PerspectiveCamera, dt: f32) {
        let cfg = &self.config;

        let mut finished = false;
        if let Some(t) = &mut self.transition {
            t.elapsed += dt.max(0.0);
            let raw = if t.duration > 0.0 { t.elapsed / t.duration } else { 1.0 };
            let e = cfg.transition_easing.apply(raw);
            self.target = lerp_vec3(t.from_target, self.goal_target, e);
            if let Some(r) = t.to_radius {
                self.spherical.radius = lerp(t.from_radius, r, e);
            }
            if let Some((theta, phi)) = t.to_angles {
                self.spherical.theta = t.from_angles.0 + wrap_delta(t.from_angles.0, theta) * e;
                self.spherical.phi = lerp(t.from_angles.1, phi, e);
            }
            finished = raw >= 1.0;
        } else if self.following {
            self.target = self.goal_target;
        }
        if finished {
            self.transition = None;
        }

        self.spherical.theta += self.pending_theta * cfg.damping;
        self.spherical.phi += self.pending_phi * cfg.damping;
        self.spherical.phi = self.spherical.phi.clamp(cfg.min_polar, cfg.max_polar);
        self.spherical.radius =
            (self.spherical.radius * self.scale).clamp(cfg.min_distance, cfg.max_distance);

        self.pending_theta *= 1.0 - cfg.damping;
        self.pending_phi *= 1.0 - cfg.damping;
        self.scale = 1.0;

        camera.target = self.target;
        camera.position = self.target + self.spherical.to_offset();
    }
}
