use std::f32::consts::PI;
use figment::Figment;
use figment::providers::{Format, Json, Serialized};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::types::{EntityId, GameEvent, HudState};
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::error::{EngineError, Result};
use crate::extensions::orbit::{ControlsConfig, OrbitControls};
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::lines::LineBuffer;
use crate::renderer::points::PointBuffer;
use crate::systems::lighting::LightState;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Initial camera setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 2500.0,
            position: [0.0, 30.0, 60.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Configuration for the engine, provided by the game.
///
/// Games return their defaults from `Game::config()`; the host page may
/// overlay a partial JSON object on top (see `GameConfig::overlay_json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most ticks run in one frame when catching up (default: 10).
    pub max_catch_up_steps: u32,
    /// Maximum number of mesh instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_catch_up_steps: 10,
            max_instances: 64,
            max_events: 32,
            max_lights: 4,
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

fn invalid(msg: impl std::fmt::Display) -> EngineError {
    EngineError::Config(<serde_json::Error as serde::de::Error>::custom(msg))
}

impl GameConfig {
    /// Layer a JSON object over `self` and return the merged, validated config.
    ///
    /// Objects merge key by key; any other value replaces the one below it.
    pub fn overlay_json(&self, json: &str) -> Result<GameConfig> {
        let config: GameConfig = Figment::from(Serialized::defaults(self))
            .merge(Json::string(json))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(invalid(format!("fixed_dt must be positive, got {}", self.fixed_dt)));
        }
        let cam = &self.camera;
        if !(cam.fov_deg > 0.0 && cam.fov_deg < 180.0) {
            return Err(invalid(format!("camera.fov_deg out of range: {}", cam.fov_deg)));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(invalid(format!("camera near/far invalid: {} / {}", cam.near, cam.far)));
        }
        let c = &self.controls;
        if !(c.min_distance > 0.0 && c.max_distance >= c.min_distance) {
            return Err(invalid(format!(
                "controls distance range invalid: {}..{}",
                c.min_distance, c.max_distance
            )));
        }
        if !(0.0..=1.0).contains(&c.damping) {
            return Err(invalid(format!("controls.damping must be in [0, 1], got {}", c.damping)));
        }
        let polar = 0.0..=PI;
        if !(polar.contains(&c.min_polar) && polar.contains(&c.max_polar) && c.min_polar <= c.max_polar) {
            return Err(invalid(format!(
                "controls polar range must lie in [0, pi] with min <= max, got {}..{}",
                c.min_polar, c.max_polar
            )));
        }
        for (name, value) in [
            ("rotate_speed", c.rotate_speed),
            ("zoom_speed", c.zoom_speed),
            ("focus_radius_factor", c.focus_radius_factor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("controls.{} must be positive, got {}", name, value)));
            }
        }
        if !(c.transition_secs.is_finite() && c.transition_secs >= 0.0) {
            return Err(invalid(format!(
                "controls.transition_secs must not be negative, got {}",
                c.transition_secs
            )));
        }
        Ok(())
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. Apply input, advance animation, steer the camera.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// UI-facing state, read by the host page after each frame.
    fn hud(&self) -> HudState {
        HudState::default()
    }

    /// Optional read-only pass for screen-space overlay drawing.
    /// Runs once per frame after world transforms are up to date.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub lights: LightState,
    /// Static point cloud (built once in init).
    pub points: PointBuffer,
    /// Static line geometry (built once in init).
    pub lines: LineBuffer,
    pub events: Vec<GameEvent>,
    /// Seconds per tick.
    pub dt: f32,
    next_id: u32,
    /// Entity the camera target is locked onto.
    follow: Option<EntityId>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let cam = &config.camera;
        let camera = PerspectiveCamera::new(cam.fov_deg, cam.near, cam.far)
            .looking_at(Vec3::from(cam.position), Vec3::from(cam.target));
        let controls = OrbitControls::new(&config.controls, &camera);
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            camera,
            controls,
            lights: LightState::with_capacity(config.max_lights),
            points: PointBuffer::default(),
            lines: LineBuffer::new(),
            events: Vec::new(),
            dt: config.fixed_dt,
            next_id: 1,
            follow: None,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an entity and register it in the transform graph,
    /// optionally under `parent`.
    pub fn spawn_node(
        &mut self,
        entity: Entity,
        local: LocalTransform,
        parent: Option<EntityId>,
    ) -> Result<EntityId> {
        let id = entity.id;
        if self.scene.contains(id) {
            return Err(EngineError::DuplicateEntity(id));
        }
        self.graph.register_with(id, local);
        if let Err(e) = self.graph.set_parent(id, parent) {
            self.graph.remove(id);
            return Err(e);
        }
        self.scene.spawn(entity)?;
        Ok(id)
    }

    /// Ease the camera onto `id` and keep following it as it moves.
    pub fn focus_on(&mut self, id: EntityId) -> Result<()> {
        let entity = self.scene.get(id).ok_or(EngineError::UnknownEntity(id))?;
        let radius = entity
            .mesh
            .as_ref()
            .map_or(1.0, |m| m.shape.bounding_radius() * entity.max_scale());
        self.controls.focus(entity.position(), radius);
        self.follow = Some(id);
        log::debug!("camera focus on {:?} (radius {:.2})", id, radius);
        Ok(())
    }

    /// Entity the camera is following, if any.
    pub fn focused(&self) -> Option<EntityId> {
        self.follow
    }

    /// Stop following and ease back to the starting view.
    pub fn reset_camera(&mut self) {
        self.follow = None;
        self.controls.reset();
    }

    /// Stop following, leaving the camera where it is.
    pub fn release_focus(&mut self) {
        self.follow = None;
        self.controls.release();
    }

    /// Recompute world matrices, then advance the camera by one tick.
    /// The runner calls this after every `Game::update`.
    pub fn step_transforms(&mut self) {
        self.graph.propagate(&mut self.scene);
        if let Some(id) = self.follow {
            match self.scene.get(id) {
                Some(entity) => self.controls.follow(entity.position()),
                None => self.release_focus(),
            }
        }
        self.controls.update(&mut self.camera, self.dt);
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only scene access plus the overlay to draw into.
pub struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub camera: &'a PerspectiveCamera,
    #[cfg(feature = "vectors")]
    pub vectors: &'a mut VectorState,
}
