use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A game event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}

/// One labelled line in the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    pub label: String,
    pub value: String,
}

impl PanelRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Content of the inspection panel for the selected object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelContent {
    pub title: String,
    pub rows: Vec<PanelRow>,
    pub description: String,
}

/// Snapshot of the UI-facing state, read by the host page once per frame.
///
/// Serialized as JSON across the WASM boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudState {
    /// Whether the animation is advancing.
    pub playing: bool,
    /// Current animation speed (radians per tick before per-body multipliers).
    pub speed: f32,
    /// Detail panel content; `None` hides the panel.
    pub panel: Option<PanelContent>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            playing: true,
            speed: 0.0,
            panel: None,
        }
    }
}
