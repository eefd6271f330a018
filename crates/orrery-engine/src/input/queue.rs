/// Input event types the engine understands.
/// Generic, no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at canvas pixel coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at canvas pixel coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to canvas pixel coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Mouse wheel. Positive `delta_y` scrolls away from the user (zoom out).
    Wheel { delta_y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The viewport changed size (CSS pixels).
    Resize { width: f32, height: f32 },
    /// A custom event from the UI layer (DOM buttons, sliders).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Typed commands from the page controls, carried as `Custom` events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiCommand {
    TogglePlayback,
    SetSpeed(f32),
    Reset,
    ClosePanel,
}

impl UiCommand {
    pub const KIND_TOGGLE: u32 = 1;
    pub const KIND_SPEED: u32 = 2;
    pub const KIND_RESET: u32 = 3;
    pub const KIND_CLOSE_PANEL: u32 = 4;

    pub fn to_event(self) -> InputEvent {
        let (kind, a) = match self {
            UiCommand::TogglePlayback => (Self::KIND_TOGGLE, 0.0),
            UiCommand::SetSpeed(speed) => (Self::KIND_SPEED, speed),
            UiCommand::Reset => (Self::KIND_RESET, 0.0),
            UiCommand::ClosePanel => (Self::KIND_CLOSE_PANEL, 0.0),
        };
        InputEvent::Custom { kind, a, b: 0.0, c: 0.0 }
    }

    /// Decode a custom event. Unknown kinds return `None`.
    pub fn from_custom(kind: u32, a: f32) -> Option<Self> {
        match kind {
            Self::KIND_TOGGLE => Some(UiCommand::TogglePlayback),
            Self::KIND_SPEED => Some(UiCommand::SetSpeed(a)),
            Self::KIND_RESET => Some(UiCommand::Reset),
            Self::KIND_CLOSE_PANEL => Some(UiCommand::ClosePanel),
            _ => None,
        }
    }
}

/// Browser `keyCode` values the engine cares about.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const ESCAPE: u32 = 27;
    pub const R: u32 = 82;
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
