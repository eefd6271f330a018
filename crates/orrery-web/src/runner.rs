use orrery_engine::{
    Game, GameConfig, EngineContext, EngineError, RenderContext,
    InputEvent, InputQueue, InstanceBuffer,
    FixedTimestep, FrameData, ProtocolLayout,
};
use orrery_engine::bridge::protocol::pack_frame;
use orrery_engine::systems::render::build_instance_buffer;
#[cfg(feature = "vectors")]
use orrery_engine::VectorState;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `solar-system`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Stands in for the input queue on catch-up ticks.
    no_input: InputQueue,
    instances: InstanceBuffer,
    frame_buffer: Vec<f32>,
    frame: u32,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_catch_up_steps);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            instances: InstanceBuffer::with_capacity(config.max_instances),
            frame_buffer: Vec::with_capacity(layout.buffer_total_floats),
            frame: 0,
            timestep,
            layout,
            config,
            initialized: false,
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
        }
    }

    /// Initialize the game with its own defaults. Call once after construction.
    pub fn init(&mut self) {
        let config = self.game.config();
        if let Err(e) = config.validate() {
            log::warn!("game config rejected ({}), using engine defaults", e);
            self.start(GameConfig::default());
        } else {
            self.start(config);
        }
    }

    /// Initialize with a JSON object layered over the game's defaults.
    /// Nothing is started if the overlay is invalid.
    pub fn init_with_overrides(&mut self, json: &str) -> Result<(), EngineError> {
        let config = self.game.config().overlay_json(json)?;
        log::info!("config overlay applied");
        self.start(config);
        Ok(())
    }

    fn start(&mut self, config: GameConfig) {
        self.timestep = FixedTimestep::new(config.fixed_dt, config.max_catch_up_steps);
        self.layout = ProtocolLayout::from_config(&config);
        let viewport = self.ctx.camera.viewport();
        self.ctx = EngineContext::from_config(&config);
        if let Err(e) = self.ctx.camera.set_viewport(viewport.x, viewport.y) {
            log::warn!("{}", e);
        }
        self.config = config;

        self.game.init(&mut self.ctx);
        self.ctx.step_transforms();
        self.initialized = true;
        self.rebuild_frame();
        log::info!(
            "scene ready: {} entities, {} points, {} line vertices",
            self.ctx.scene.len(),
            self.ctx.points.point_count(),
            self.ctx.lines.vertex_count()
        );
    }

    /// Push an input event into the queue.
    /// Viewport changes are applied to the camera immediately.
    pub fn push_input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width, height } = event {
            if let Err(e) = self.ctx.camera.set_viewport(width, height) {
                log::warn!("ignoring resize: {}", e);
                return;
            }
        }
        self.input.push(event);
    }

    /// Run one frame: fixed-step updates, then rebuild the frame buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            // Input is applied once, on the first tick of the frame.
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
            self.ctx.step_transforms();
        }
        if steps > 0 {
            self.input.drain();
        }

        self.frame = self.frame.wrapping_add(1);
        self.rebuild_frame();
    }

    fn rebuild_frame(&mut self) {
        build_instance_buffer(self.ctx.scene.iter(), &mut self.instances);

        #[cfg(feature = "vectors")]
        self.vectors.clear();
        {
            let mut render_ctx = RenderContext {
                scene: &self.ctx.scene,
                camera: &self.ctx.camera,
                #[cfg(feature = "vectors")]
                vectors: &mut self.vectors,
            };
            self.game.render(&mut render_ctx);
        }

        let camera = &self.ctx.camera;
        let viewport = camera.viewport();
        let data = FrameData {
            frame: self.frame,
            camera: camera.uniform(),
            viewport: [viewport.x, viewport.y],
            near_far: [camera.near, camera.far],
            instances: &self.instances.instances,
            transparent_split: self.instances.transparent_split,
            events: &self.ctx.events,
            lights: &self.ctx.lights,
        };
        pack_frame(&self.layout, &data, &mut self.frame_buffer);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// HUD snapshot as JSON for the page.
    pub fn hud_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(&self.game.hud())?)
    }

    // ---- Pointer accessors for reads from JS ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.ctx.points.positions_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.ctx.points.point_count()
    }

    pub fn point_size(&self) -> f32 {
        self.ctx.points.size
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.ctx.lines.vertices_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.ctx.lines.vertex_count()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
