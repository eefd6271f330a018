/// Per-frame buffer layout shared with the JS renderer.
/// Must stay in sync with `demos/solar-system/www/protocol.js`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]            view_proj (16) + eye xyz + fov
/// [Instances: max_instances × 28 floats]
/// [Events: max_events × 4 floats]
/// [Lights: max_lights × 8 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// JS reads them from the header to compute offsets dynamically.
///
/// Static geometry (starfield points, orbit lines) never changes after init
/// and is read through its own pointer/count accessors instead.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::MeshInstance;
use crate::systems::lighting::{LightState, PointLight};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TRANSPARENT_SPLIT: usize = 4;
pub const HEADER_MAX_EVENTS: usize = 5;
pub const HEADER_EVENT_COUNT: usize = 6;
pub const HEADER_MAX_LIGHTS: usize = 7;
pub const HEADER_LIGHT_COUNT: usize = 8;
pub const HEADER_AMBIENT_R: usize = 9;
pub const HEADER_AMBIENT_G: usize = 10;
pub const HEADER_AMBIENT_B: usize = 11;
pub const HEADER_VIEWPORT_WIDTH: usize = 12;
pub const HEADER_VIEWPORT_HEIGHT: usize = 13;
pub const HEADER_CAMERA_NEAR: usize = 14;
pub const HEADER_CAMERA_FAR: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section (wire format, fixed).
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per mesh instance (wire format, fixed).
pub const INSTANCE_FLOATS: usize = MeshInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Floats per point light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = 8;

/// Default light capacity.
pub const DEFAULT_MAX_LIGHTS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_events: usize,
    pub max_lights: usize,

    pub instance_data_floats: usize,
    pub event_data_floats: usize,
    pub light_data_floats: usize,

    /// Offset (in floats) where the camera uniform begins.
    pub camera_offset: usize,
    pub instance_data_offset: usize,
    pub event_data_offset: usize,
    pub light_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_events: usize, max_lights: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let event_data_offset = instance_data_offset + instance_data_floats;
        let light_data_offset = event_data_offset + event_data_floats;

        let buffer_total_floats = light_data_offset + light_data_floats;

        Self {
            max_instances,
            max_events,
            max_lights,
            instance_data_floats,
            event_data_floats,
            light_data_floats,
            camera_offset,
            instance_data_offset,
            event_data_offset,
            light_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_events, config.max_lights)
    }
}

/// Everything that changes per frame, borrowed for packing.
pub struct FrameData<'a> {
    pub frame: u32,
    pub camera: CameraUniform,
    pub viewport: [f32; 2],
    pub near_far: [f32; 2],
    pub instances: &'a [MeshInstance],
    pub transparent_split: u32,
    pub events: &'a [GameEvent],
    pub lights: &'a LightState,
}

/// Write `data` into `out` following `layout`.
///
/// Sections over capacity are truncated and logged; `out` is resized to
/// `layout.buffer_total_floats` and unused slots are zeroed.
pub fn pack_frame(layout: &ProtocolLayout, data: &FrameData, out: &mut Vec<f32>) {
    out.clear();
    out.resize(layout.buffer_total_floats, 0.0);

    let instance_count = data.instances.len().min(layout.max_instances);
    let event_count = data.events.len().min(layout.max_events);
    let lights: Vec<PointLight> = data.lights.iter().take(layout.max_lights).copied().collect();

    if instance_count < data.instances.len() {
        log::warn!("instance buffer full: dropping {} instances", data.instances.len() - instance_count);
    }
    if event_count < data.events.len() {
        log::warn!("event buffer full: dropping {} events", data.events.len() - event_count);
    }
    if lights.len() < data.lights.count() {
        log::warn!("light buffer full: dropping {} lights", data.lights.count() - lights.len());
    }

    let ambient = data.lights.ambient();
    let header = &mut out[..HEADER_FLOATS];
    header[HEADER_FRAME_COUNTER] = data.frame as f32;
    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    header[HEADER_INSTANCE_COUNT] = instance_count as f32;
    header[HEADER_TRANSPARENT_SPLIT] = (data.transparent_split as usize).min(instance_count) as f32;
    header[HEADER_MAX_EVENTS] = layout.max_events as f32;
    header[HEADER_EVENT_COUNT] = event_count as f32;
    header[HEADER_MAX_LIGHTS] = layout.max_lights as f32;
    header[HEADER_LIGHT_COUNT] = lights.len() as f32;
    header[HEADER_AMBIENT_R] = ambient[0];
    header[HEADER_AMBIENT_G] = ambient[1];
    header[HEADER_AMBIENT_B] = ambient[2];
    header[HEADER_VIEWPORT_WIDTH] = data.viewport[0];
    header[HEADER_VIEWPORT_HEIGHT] = data.viewport[1];
    header[HEADER_CAMERA_NEAR] = data.near_far[0];
    header[HEADER_CAMERA_FAR] = data.near_far[1];

    let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&data.camera));
    out[layout.camera_offset..layout.camera_offset + CAMERA_FLOATS].copy_from_slice(camera);

    let instances: &[f32] = bytemuck::cast_slice(&data.instances[..instance_count]);
    out[layout.instance_data_offset..layout.instance_data_offset + instances.len()].copy_from_slice(instances);

    let events: &[f32] = bytemuck::cast_slice(&data.events[..event_count]);
    out[layout.event_data_offset..layout.event_data_offset + events.len()].copy_from_slice(events);

    let light_floats: &[f32] = bytemuck::cast_slice(&lights);
    out[layout.light_data_offset..layout.light_data_offset + light_floats.len()].copy_from_slice(light_floats);
}
