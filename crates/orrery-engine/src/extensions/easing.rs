// extensions/easing.rs
//
// Easing curves for camera transitions.
// No dependencies on Entity/Scene, just math.

use std::f32::consts::PI;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing function type. Serialized in snake_case for config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow start and end.
    QuadInOut,
    /// Slow end.
    CubicOut,
    /// Stronger slow start and end.
    #[default]
    CubicInOut,
    SineInOut,
    /// Fast departure, long settle.
    ExpoOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t`.
    /// Input is clamped to [0, 1]; every curve maps 0 to 0 and 1 to 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::QuadInOut,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineInOut,
        Easing::ExpoOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for e in ALL {
            assert!(e.apply(0.0).abs() < 1e-3, "{:?} at 0", e);
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", e);
        }
    }

    #[test]
    fn in_out_curves_hit_midpoint() {
        for e in [Easing::QuadInOut, Easing::CubicInOut, Easing::SineInOut] {
            assert!((e.apply(0.5) - 0.5).abs() < 1e-5, "{:?}", e);
        }
    }

    #[test]
    fn cubic_out_faster_start() {
        let mid = Easing::CubicOut.apply(0.5);
        assert!(mid > 0.5, "CubicOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
    }

    #[test]
    fn lerp_vec3_interpolates() {
        let v = lerp_vec3(Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0), Easing::Linear.apply(0.5));
        assert!((v - Vec3::new(5.0, 10.0, 15.0)).length() < 1e-5);
    }

    #[test]
    fn deserializes_snake_case() {
        let e: Easing = serde_json::from_str("\"cubic_in_out\"").unwrap();
        assert_eq!(e, Easing::CubicInOut);
    }
}
