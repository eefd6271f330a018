pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, CameraConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent, HudState, PanelContent, PanelRow};
pub use error::EngineError;
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, MeshShape, MeshColor};
pub use crate::core::scene::Scene;
pub use crate::core::time::FixedTimestep;
pub use crate::core::rng::Rng;
pub use renderer::camera::{PerspectiveCamera, CameraUniform};
pub use renderer::instance::{MeshInstance, InstanceBuffer};
pub use renderer::lines::{LineBuffer, LineVertex};
pub use renderer::points::PointBuffer;
pub use input::queue::{InputEvent, InputQueue, UiCommand};
pub use input::pointer::{PointerTracker, PointerAction};
pub use bridge::protocol::{ProtocolLayout, FrameData, LIGHT_FLOATS, DEFAULT_MAX_LIGHTS};
pub use systems::lighting::{PointLight, LightState};
pub use systems::picking::{Ray, PickHit};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};

// Extensions: scene graph, camera controls, easing
pub use extensions::{
    Easing, lerp, lerp_vec3,
    TransformGraph, LocalTransform,
    OrbitControls, ControlsConfig, Spherical,
};
