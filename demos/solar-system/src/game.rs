//! Solar System: sun, eight planets on tilted orbit groups, a starfield and
//! orbit guides. Drag to orbit the camera, scroll to zoom, click a body to
//! inspect it.

use orrery_engine::*;
use orrery_engine::input::queue::keys;
use orrery_engine::systems::picking;
use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

use crate::bodies::{self, BodyInfo};
use crate::orbit;
use crate::panel;

// ── Animation defaults ───────────────────────────────────────────────

/// Base angle step per tick (radians) before per-body multipliers.
pub const DEFAULT_SPEED: f32 = 0.01;

// ── Game event kinds to the page ─────────────────────────────────────

/// a = selected body index (-1 for none), b = entity id.
pub const EVENT_SELECTION: f32 = 1.0;
/// a = 1 when playing, b = speed.
pub const EVENT_PLAYBACK: f32 = 2.0;

// ── Selection reticle ────────────────────────────────────────────────

#[cfg(feature = "vectors")]
const RETICLE_COLOR: VectorColor = VectorColor::new(1.0, 1.0, 1.0, 0.6);
#[cfg(feature = "vectors")]
const RETICLE_WIDTH: f32 = 1.5;
#[cfg(feature = "vectors")]
const RETICLE_PADDING: f32 = 6.0;
#[cfg(feature = "vectors")]
const RETICLE_MIN_RADIUS: f32 = 8.0;

/// Index of the sun in `SolarSystem::bodies`; planets follow in table order.
pub const SUN: usize = 0;

/// A body in the scene: its mesh entity, the orbit group carrying it, and
/// its per-tick multipliers.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub mesh: EntityId,
    /// `None` for the sun, which does not revolve.
    pub group: Option<EntityId>,
    pub orbit_speed: f32,
    pub spin: f32,
    pub info: &'static BodyInfo,
}

/// Playback state driven by the page controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub speed: f32,
    pub rotating: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            rotating: true,
        }
    }
}

pub struct SolarSystem {
    anim: AnimationState,
    bodies: Vec<CelestialBody>,
    ring: Option<EntityId>,
    selected: Option<usize>,
    pointer: PointerTracker,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            anim: AnimationState::default(),
            bodies: Vec::with_capacity(bodies::PLANET_COUNT + 1),
            ring: None,
            selected: None,
            pointer: PointerTracker::new(),
        }
    }

    pub fn animation(&self) -> AnimationState {
        self.anim
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn ring(&self) -> Option<EntityId> {
        self.ring
    }

    // ── Scene construction ─────────────────────────────────────────

    fn build_scene(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        // Lights
        ctx.lights.add(PointLight::new(
            Vec3::ZERO,
            [1.0, 1.0, 1.0],
            bodies::SUN_LIGHT_INTENSITY,
            bodies::SUN_LIGHT_RANGE,
        ));
        let ambient = MeshColor::hex(bodies::AMBIENT_COLOR);
        let k = bodies::AMBIENT_INTENSITY;
        ctx.lights.set_ambient(ambient.r * k, ambient.g * k, ambient.b * k);

        // Sun
        let sun_id = ctx.next_id();
        ctx.spawn_node(
            Entity::new(sun_id)
                .with_tag(bodies::SUN_INFO.name)
                .with_mesh(
                    MeshComponent::sphere(bodies::SUN_RADIUS, MeshColor::hex(bodies::SUN_COLOR))
                        .with_emissive(bodies::SUN_EMISSIVE)
                        .unlit(),
                )
                .pickable(),
            LocalTransform::new(),
            None,
        )?;
        self.bodies.push(CelestialBody {
            mesh: sun_id,
            group: None,
            orbit_speed: 0.0,
            spin: 0.0,
            info: &bodies::SUN_INFO,
        });

        // Planets, each inside its own tilted orbit group
        let shininess = bodies::roughness_to_shininess(bodies::PLANET_ROUGHNESS);
        for (desc, info) in bodies::PLANETS.iter().zip(bodies::PLANET_INFO.iter()) {
            let group_id = ctx.next_id();
            ctx.spawn_node(
                Entity::new(group_id).with_tag(format!("{} orbit", info.name)),
                orbit::group_transform(desc.tilt, 0.0),
                None,
            )?;

            let mesh_id = ctx.next_id();
            ctx.spawn_node(
                Entity::new(mesh_id)
                    .with_tag(info.name)
                    .with_mesh(
                        MeshComponent::sphere(desc.size, MeshColor::hex(desc.color)).with_shininess(shininess),
                    )
                    .pickable(),
                LocalTransform::new().with_translation(Vec3::new(desc.distance, 0.0, 0.0)),
                Some(group_id),
            )?;

            self.bodies.push(CelestialBody {
                mesh: mesh_id,
                group: Some(group_id),
                orbit_speed: desc.orbit_speed,
                spin: desc.spin,
                info,
            });

            let c = MeshColor::hex(desc.color);
            let path = orbit::orbit_path(desc.distance, desc.tilt, orbit::ORBIT_SAMPLES);
            ctx.lines.push_loop(&path, [c.r, c.g, c.b, orbit::ORBIT_ALPHA]);
        }

        // Saturn's ring rides on the planet mesh, laid flat in its equator
        let ring_parent = self.bodies[bodies::RING_PLANET + 1].mesh;
        let ring_id = ctx.next_id();
        ctx.spawn_node(
            Entity::new(ring_id)
                .with_tag("Saturn ring")
                .with_mesh(
                    MeshComponent::ring(bodies::RING_INNER, bodies::RING_OUTER, MeshColor::hex(bodies::RING_COLOR))
                        .with_opacity(bodies::RING_OPACITY)
                        .double_sided()
                        .unlit(),
                )
                .pickable(),
            LocalTransform::new().with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            Some(ring_parent),
        )?;
        self.ring = Some(ring_id);

        // Stars
        ctx.points = PointBuffer::new(bodies::STAR_SIZE, [1.0, 1.0, 1.0]);
        let mut rng = Rng::new(bodies::STAR_SEED);
        ctx.points.scatter_cube(bodies::STAR_COUNT, bodies::STAR_HALF_EXTENT, &mut rng);

        Ok(())
    }

    // ── Animation ──────────────────────────────────────────────────

    /// Advance every planet's spin and revolution by one tick.
    fn animate(&self, ctx: &mut EngineContext) {
        let speed = self.anim.speed;
        for body in &self.bodies {
            let Some(group) = body.group else { continue };
            if let Some(local) = ctx.graph.get_local_mut(body.mesh) {
                local.rotation.y = orbit::advance(local.rotation.y, speed * body.spin);
            }
            if let Some(local) = ctx.graph.get_local_mut(group) {
                local.rotation.y = orbit::advance(local.rotation.y, speed * body.orbit_speed);
            }
        }
    }

    // ── Commands ───────────────────────────────────────────────────

    fn apply_command(&mut self, ctx: &mut EngineContext, cmd: UiCommand) {
        match cmd {
            UiCommand::TogglePlayback => {
                self.anim.rotating = !self.anim.rotating;
                log::debug!("playback {}", if self.anim.rotating { "resumed" } else { "paused" });
                self.emit_playback(ctx);
            }
            UiCommand::SetSpeed(speed) => {
                if speed.is_finite() && speed >= 0.0 {
                    self.anim.speed = speed;
                    self.emit_playback(ctx);
                } else {
                    log::warn!("ignoring speed {}", speed);
                }
            }
            UiCommand::Reset => {
                ctx.reset_camera();
                self.set_selection(ctx, None);
            }
            UiCommand::ClosePanel => {
                if self.selected.is_none() {
                    return;
                }
                ctx.release_focus();
                self.set_selection(ctx, None);
            }
        }
    }

    fn on_key(&mut self, ctx: &mut EngineContext, key_code: u32) {
        let cmd = match key_code {
            keys::SPACE => UiCommand::TogglePlayback,
            keys::R => UiCommand::Reset,
            keys::ESCAPE => UiCommand::ClosePanel,
            _ => return,
        };
        self.apply_command(ctx, cmd);
    }

    fn emit_playback(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent {
            kind: EVENT_PLAYBACK,
            a: if self.anim.rotating { 1.0 } else { 0.0 },
            b: self.anim.speed,
            c: 0.0,
        });
    }

    // ── Selection ──────────────────────────────────────────────────

    /// Body owning `id`. The ring resolves to its planet.
    pub fn body_for_entity(&self, id: EntityId) -> Option<usize> {
        if Some(id) == self.ring {
            return Some(bodies::RING_PLANET + 1);
        }
        self.bodies.iter().position(|b| b.mesh == id)
    }

    fn set_selection(&mut self, ctx: &mut EngineContext, selected: Option<usize>) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
        let (a, b) = match selected.and_then(|i| self.bodies.get(i)) {
            Some(body) => (selected.map_or(-1.0, |i| i as f32), body.mesh.0 as f32),
            None => (-1.0, 0.0),
        };
        ctx.emit_event(GameEvent { kind: EVENT_SELECTION, a, b, c: 0.0 });
    }

    /// Cast a ray through `pos`; a hit selects the body and focuses the camera on it.
    fn click(&mut self, ctx: &mut EngineContext, pos: Vec2) {
        let ray = ctx.camera.screen_ray(pos);
        let Some(hit) = picking::pick(ctx.scene.iter(), &ray) else {
            log::debug!("click at {:?} hit nothing", pos);
            return;
        };
        let Some(index) = self.body_for_entity(hit.id) else { return };
        let body = &self.bodies[index];
        log::debug!("selected {} at t={:.2}", body.info.name, hit.distance);

        let mesh = body.mesh;
        if let Err(e) = ctx.focus_on(mesh) {
            log::warn!("cannot focus: {}", e);
        }
        self.set_selection(ctx, Some(index));
    }

    // ── Overlay ────────────────────────────────────────────────────

    /// Circle around the selected body, sized to its on-screen radius.
    #[cfg(feature = "vectors")]
    fn draw_reticle(&self, ctx: &mut RenderContext) {
        let Some(body) = self.selected.and_then(|i| self.bodies.get(i)) else { return };
        let Some(entity) = ctx.scene.get(body.mesh) else { return };
        let Some(center) = ctx.camera.project_to_screen(entity.position()) else { return };

        let radius = entity
            .mesh
            .as_ref()
            .map_or(1.0, |m| m.shape.bounding_radius() * entity.max_scale());
        let depth = (entity.position() - ctx.camera.position).length();
        let on_screen = radius * ctx.camera.pixels_per_unit(depth);
        let r = (on_screen + RETICLE_PADDING).max(RETICLE_MIN_RADIUS);
        ctx.vectors.stroke_circle(center, r, RETICLE_WIDTH, RETICLE_COLOR);
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 16,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.bodies.clear();
        self.ring = None;
        self.selected = None;
        if let Err(e) = self.build_scene(ctx) {
            log::error!("scene setup failed: {}", e);
            return;
        }
        log::info!(
            "solar system: {} bodies, {} stars",
            self.bodies.len(),
            ctx.points.point_count()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // ── Handle input ─────────────────────────────────────────────
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.pointer.on_down(Vec2::new(x, y)),
                InputEvent::PointerMove { x, y } => {
                    if let PointerAction::Drag { delta } = self.pointer.on_move(Vec2::new(x, y)) {
                        let height = ctx.camera.viewport().y;
                        ctx.controls.rotate(delta.x, delta.y, height);
                    }
                }
                InputEvent::PointerUp { x, y } => {
                    if let PointerAction::Click { pos } = self.pointer.on_up(Vec2::new(x, y)) {
                        self.click(ctx, pos);
                    }
                }
                InputEvent::Wheel { delta_y } => ctx.controls.zoom(delta_y),
                InputEvent::KeyDown { key_code } => self.on_key(ctx, key_code),
                InputEvent::Custom { kind, a, .. } => match UiCommand::from_custom(kind, a) {
                    Some(cmd) => self.apply_command(ctx, cmd),
                    None => log::warn!("unknown custom event kind {}", kind),
                },
                _ => {}
            }
        }

        // ── Advance animation ────────────────────────────────────────
        if self.anim.rotating {
            self.animate(ctx);
        }
    }

    fn hud(&self) -> HudState {
        HudState {
            playing: self.anim.rotating,
            speed: self.anim.speed,
            panel: self
                .selected
                .and_then(|i| self.bodies.get(i))
                .map(|b| panel::panel_for(b.info)),
        }
    }

    #[cfg(feature = "vectors")]
    fn render(&self, ctx: &mut RenderContext) {
        self.draw_reticle(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, MERCURY, SATURN};

    fn setup() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::from_config(&game.config());
        game.init(&mut ctx);
        ctx.step_transforms();
        (game, ctx)
    }

    fn tick(game: &mut SolarSystem, ctx: &mut EngineContext, events: &[InputEvent]) {
        let mut queue = InputQueue::new();
        for &e in events {
            queue.push(e);
        }
        game.update(ctx, &queue);
        ctx.step_transforms();
    }

    fn planet(game: &SolarSystem, index: usize) -> &CelestialBody {
        &game.bodies()[index + 1]
    }

    #[test]
    fn scene_has_sun_planets_ring_and_stars() {
        let (game, ctx) = setup();
        assert_eq!(game.bodies().len(), 9);
        // sun + 8 groups + 8 planets + ring
        assert_eq!(ctx.scene.len(), 18);
        assert_eq!(ctx.points.point_count(), 10_000);
        assert_eq!(ctx.lines.vertex_count() as usize, 8 * orbit::ORBIT_SAMPLES * 2);
        assert_eq!(ctx.lights.count(), 1);
        let ambient = ctx.lights.ambient();
        assert!((ambient[0] - 0x40 as f32 / 255.0 * 0.2).abs() < 1e-6);
    }

    #[test]
    fn stars_are_deterministic_and_in_bounds() {
        let (_, a) = setup();
        let (_, b) = setup();
        assert_eq!(a.points.positions(), b.points.positions());
        assert!(a.points.positions().iter().all(|v| v.abs() <= 1000.0));
        assert_eq!(a.points.size, 0.5);
    }

    #[test]
    fn planets_start_on_their_tilted_orbits() {
        let (game, ctx) = setup();
        let earth = ctx.scene.get(planet(&game, EARTH).mesh).unwrap();
        assert!((earth.position() - Vec3::new(14.0, 0.0, 0.0)).length() < 1e-4);

        let mercury = ctx.scene.get(planet(&game, MERCURY).mesh).unwrap();
        let expected = orbit::orbit_position(8.0, 0.034, 0.0);
        assert!((mercury.position() - expected).length() < 1e-4);
    }

    #[test]
    fn tick_spins_and_revolves_by_multipliers() {
        let (mut game, mut ctx) = setup();
        tick(&mut game, &mut ctx, &[]);

        let mercury = planet(&game, MERCURY).clone();
        let spin = ctx.graph.get_local(mercury.mesh).unwrap().rotation.y;
        let orbit_angle = ctx.graph.get_local(mercury.group.unwrap()).unwrap().rotation.y;
        assert!((spin - 0.01 * 1.5).abs() < 1e-6);
        assert!((orbit_angle - 0.01 * 1.6).abs() < 1e-6);

        // World position follows the orbit path.
        let pos = ctx.scene.get(mercury.mesh).unwrap().position();
        let expected = orbit::orbit_position(8.0, 0.034, orbit_angle);
        assert!((pos - expected).length() < 1e-4);
    }

    #[test]
    fn pause_freezes_animation() {
        let (mut game, mut ctx) = setup();
        tick(&mut game, &mut ctx, &[UiCommand::TogglePlayback.to_event()]);
        assert!(!game.animation().rotating);
        assert!(!game.hud().playing);
        let group = planet(&game, EARTH).group.unwrap();
        assert_eq!(ctx.graph.get_local(group).unwrap().rotation.y, 0.0);

        tick(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: keys::SPACE }]);
        assert!(game.animation().rotating);
        assert!(ctx.graph.get_local(group).unwrap().rotation.y > 0.0);
    }

    #[test]
    fn speed_command_validates() {
        let (mut game, mut ctx) = setup();
        tick(&mut game, &mut ctx, &[UiCommand::SetSpeed(0.05).to_event()]);
        assert_eq!(game.animation().speed, 0.05);
        tick(&mut game, &mut ctx, &[UiCommand::SetSpeed(-1.0).to_event()]);
        tick(&mut game, &mut ctx, &[UiCommand::SetSpeed(f32::NAN).to_event()]);
        assert_eq!(game.animation().speed, 0.05);
        assert_eq!(game.hud().speed, 0.05);
    }

    #[test]
    fn click_on_sun_selects_and_focuses() {
        let (mut game, mut ctx) = setup();
        let center = ctx.camera.viewport() * 0.5;
        tick(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: center.x, y: center.y },
                InputEvent::PointerUp { x: center.x, y: center.y },
            ],
        );
        assert_eq!(game.selected(), Some(SUN));
        assert_eq!(ctx.focused(), Some(game.bodies()[SUN].mesh));
        let panel = game.hud().panel.unwrap();
        assert_eq!(panel.title, "Sun");
        assert!(ctx.events.iter().any(|e| e.kind == EVENT_SELECTION && e.a == 0.0));
    }

    #[test]
    fn click_on_planet_selects_it() {
        let (mut game, mut ctx) = setup();
        let earth = planet(&game, EARTH).mesh;
        let screen = ctx
            .camera
            .project_to_screen(ctx.scene.get(earth).unwrap().position())
            .unwrap();
        tick(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: screen.x, y: screen.y },
                InputEvent::PointerUp { x: screen.x, y: screen.y },
            ],
        );
        assert_eq!(game.selected(), Some(EARTH + 1));
        assert_eq!(game.hud().panel.unwrap().title, "Earth");
    }

    #[test]
    fn miss_keeps_selection() {
        let (mut game, mut ctx) = setup();
        let center = ctx.camera.viewport() * 0.5;
        tick(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: center.x, y: center.y },
                InputEvent::PointerUp { x: center.x, y: center.y },
            ],
        );
        tick(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: 2.0, y: 2.0 },
                InputEvent::PointerUp { x: 2.0, y: 2.0 },
            ],
        );
        assert_eq!(game.selected(), Some(SUN));
    }

    #[test]
    fn drag_rotates_instead_of_selecting() {
        let (mut game, mut ctx) = setup();
        let before = ctx.controls.spherical().theta;
        tick(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: 640.0, y: 360.0 },
                InputEvent::PointerMove { x: 700.0, y: 360.0 },
                InputEvent::PointerUp { x: 700.0, y: 360.0 },
            ],
        );
        assert_eq!(game.selected(), None);
        assert!((ctx.controls.spherical().theta - before).abs() > 1e-4);
    }

    #[test]
    fn ring_resolves_to_saturn() {
        let (game, ctx) = setup();
        let ring = game.ring().unwrap();
        assert_eq!(game.body_for_entity(ring), Some(SATURN + 1));
        assert_eq!(ctx.graph.get_parent(ring), Some(planet(&game, SATURN).mesh));
        let mesh = ctx.scene.get(ring).unwrap().mesh.unwrap();
        assert_eq!(mesh.opacity, 0.6);
        assert!(mesh.double_sided);
    }

    #[test]
    fn reset_and_close_clear_selection() {
        let (mut game, mut ctx) = setup();
        let center = ctx.camera.viewport() * 0.5;
        let click = [
            InputEvent::PointerDown { x: center.x, y: center.y },
            InputEvent::PointerUp { x: center.x, y: center.y },
        ];

        tick(&mut game, &mut ctx, &click);
        tick(&mut game, &mut ctx, &[UiCommand::ClosePanel.to_event()]);
        assert_eq!(game.selected(), None);
        assert_eq!(ctx.focused(), None);
        assert!(game.hud().panel.is_none());

        tick(&mut game, &mut ctx, &click);
        tick(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: keys::R }]);
        assert_eq!(game.selected(), None);
        assert_eq!(ctx.focused(), None);
        assert!(ctx.controls.is_transitioning());
    }

    #[test]
    fn escape_during_reset_keeps_easing_home() {
        let (mut game, mut ctx) = setup();
        let center = ctx.camera.viewport() * 0.5;
        tick(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: center.x, y: center.y },
                InputEvent::PointerUp { x: center.x, y: center.y },
            ],
        );
        for _ in 0..90 {
            tick(&mut game, &mut ctx, &[]);
        }

        tick(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: keys::R }]);
        tick(&mut game, &mut ctx, &[InputEvent::KeyDown { key_code: keys::ESCAPE }]);
        assert!(ctx.controls.is_transitioning());
        for _ in 0..90 {
            tick(&mut game, &mut ctx, &[]);
        }
        assert!((ctx.camera.position - Vec3::new(0.0, 30.0, 60.0)).length() < 1e-2);
    }

    #[test]
    fn wheel_zooms_camera() {
        let (mut game, mut ctx) = setup();
        let before = ctx.controls.distance();
        for _ in 0..30 {
            tick(&mut game, &mut ctx, &[InputEvent::Wheel { delta_y: -100.0 }]);
        }
        assert!(ctx.controls.distance() < before);
        assert!(ctx.controls.distance() >= 5.0 - 1e-3);
    }
}
