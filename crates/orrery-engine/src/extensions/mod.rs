// extensions/mod.rs
//
// Optional extension modules for the orrery engine.
// Decoupled from core Entity/Scene; games opt in by creating these systems.

pub mod easing;
pub mod orbit;
pub mod transform;

pub use easing::{Easing, lerp, lerp_vec3};
pub use orbit::{OrbitControls, ControlsConfig, Spherical};
pub use transform::{TransformGraph, LocalTransform};
