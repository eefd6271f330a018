//! Stylized circular orbits: a planet sits at `(distance, 0, 0)` inside an
//! orbit group tilted about Z; revolving the group about its Y axis carries
//! the planet around the sun.

use std::f32::consts::TAU;
use glam::Vec3;
use orrery_engine::LocalTransform;

/// Points per orbit path loop.
pub const ORBIT_SAMPLES: usize = 128;
/// Alpha of orbit path lines.
pub const ORBIT_ALPHA: f32 = 0.25;

/// Local transform of an orbit group at revolution `angle`.
pub fn group_transform(tilt: f32, angle: f32) -> LocalTransform {
    LocalTransform::new().with_rotation(Vec3::new(0.0, angle, tilt))
}

/// World position of a planet at `distance` after revolving `angle` radians.
pub fn orbit_position(distance: f32, tilt: f32, angle: f32) -> Vec3 {
    group_transform(tilt, angle)
        .matrix()
        .transform_point3(Vec3::new(distance, 0.0, 0.0))
}

/// Closed path traced by a planet over one revolution.
pub fn orbit_path(distance: f32, tilt: f32, samples: usize) -> Vec<Vec3> {
    (0..samples)
        .map(|i| orbit_position(distance, tilt, TAU * i as f32 / samples as f32))
        .collect()
}

/// Advance an angle by `delta`, kept in `[0, TAU)`.
pub fn advance(angle: f32, delta: f32) -> f32 {
    (angle + delta).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untilted_orbit_stays_flat() {
        for p in orbit_path(14.0, 0.0, 16) {
            assert!(p.y.abs() < 1e-4);
            assert!((p.length() - 14.0).abs() < 1e-3);
        }
    }

    #[test]
    fn tilted_orbit_keeps_radius_and_leaves_plane() {
        let path = orbit_path(32.0, 0.044, ORBIT_SAMPLES);
        assert_eq!(path.len(), ORBIT_SAMPLES);
        let max_y = path.iter().map(|p| p.y.abs()).fold(0.0, f32::max);
        assert!(max_y > 1.0);
        for p in &path {
            assert!((p.length() - 32.0).abs() < 1e-3);
        }
    }

    #[test]
    fn path_starts_at_rest_position() {
        let start = orbit_path(8.0, 0.034, ORBIT_SAMPLES)[0];
        let rest = orbit_position(8.0, 0.034, 0.0);
        assert!((start - rest).length() < 1e-5);
        // Tilt about Z lifts the starting point.
        assert!(rest.y > 0.0);
    }

    #[test]
    fn quarter_turn_moves_off_x_axis() {
        let p = orbit_position(10.0, 0.0, TAU / 4.0);
        assert!(p.x.abs() < 1e-4);
        assert!((p.z + 10.0).abs() < 1e-4);
    }

    #[test]
    fn advance_wraps() {
        assert!((advance(TAU - 0.01, 0.02) - 0.01).abs() < 1e-5);
        assert!((advance(1.0, 0.5) - 1.5).abs() < 1e-6);
    }
}
