//! Click-vs-drag classification for a single pointer.

use glam::Vec2;

/// Pixels the pointer may travel between down and up and still count as a click.
pub const DEFAULT_CLICK_THRESHOLD: f32 = 5.0;

/// What a pointer event turned out to mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    None,
    /// Pointer is dragging; carries the movement since the last event.
    Drag { delta: Vec2 },
    /// Pointer was released without ever leaving the click threshold.
    Click { pos: Vec2 },
}

/// Tracks one pointer from press to release.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    pressed: bool,
    dragging: bool,
    start: Vec2,
    last: Vec2,
    threshold: f32,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_CLICK_THRESHOLD)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            pressed: false,
            dragging: false,
            start: Vec2::ZERO,
            last: Vec2::ZERO,
            threshold,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn on_down(&mut self, pos: Vec2) {
        self.pressed = true;
        self.dragging = false;
        self.start = pos;
        self.last = pos;
    }

    pub fn on_move(&mut self, pos: Vec2) -> PointerAction {
        if !self.pressed {
            return PointerAction::None;
        }
        if !self.dragging && (pos - self.start).length() > self.threshold {
            self.dragging = true;
        }
        let delta = pos - self.last;
        self.last = pos;
        if self.dragging {
            PointerAction::Drag { delta }
        } else {
            PointerAction::None
        }
    }

    pub fn on_up(&mut self, pos: Vec2) -> PointerAction {
        if !self.pressed {
            return PointerAction::None;
        }
        // Up may arrive without a preceding move.
        let moved = (pos - self.start).length() > self.threshold;
        let was_drag = self.dragging || moved;
        self.pressed = false;
        self.dragging = false;
        if was_drag {
            PointerAction::None
        } else {
            PointerAction::Click { pos }
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_wiggle_is_a_click() {
        let mut p = PointerTracker::new();
        p.on_down(Vec2::new(100.0, 100.0));
        assert_eq!(p.on_move(Vec2::new(102.0, 101.0)), PointerAction::None);
        assert_eq!(
            p.on_up(Vec2::new(103.0, 101.0)),
            PointerAction::Click { pos: Vec2::new(103.0, 101.0) }
        );
    }

    #[test]
    fn drag_past_threshold_reports_deltas_and_no_click() {
        let mut p = PointerTracker::new();
        p.on_down(Vec2::ZERO);
        assert_eq!(p.on_move(Vec2::new(3.0, 0.0)), PointerAction::None);
        assert_eq!(
            p.on_move(Vec2::new(10.0, 0.0)),
            PointerAction::Drag { delta: Vec2::new(7.0, 0.0) }
        );
        // Returning to the start does not turn it back into a click.
        p.on_move(Vec2::ZERO);
        assert_eq!(p.on_up(Vec2::ZERO), PointerAction::None);
        assert!(!p.is_pressed());
    }

    #[test]
    fn up_without_move_far_away_is_not_a_click() {
        let mut p = PointerTracker::new();
        p.on_down(Vec2::ZERO);
        assert_eq!(p.on_up(Vec2::new(0.0, 20.0)), PointerAction::None);
    }

    #[test]
    fn events_without_press_are_ignored() {
        let mut p = PointerTracker::new();
        assert_eq!(p.on_move(Vec2::new(50.0, 50.0)), PointerAction::None);
        assert_eq!(p.on_up(Vec2::new(50.0, 50.0)), PointerAction::None);
    }
}
