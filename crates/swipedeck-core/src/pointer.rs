//! Pointer tracking: absolute pointer positions to cumulative drag deltas.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::gesture::GestureEvent;

/// Pointer event in screen coordinates, for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

/// Tracks the pointer across a drag and reports deltas from the drag start.
///
/// Every pointer down starts a drag on the active card.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    /// Start position of the current drag.
    drag_start: Option<Point>,
    /// Most recent pointer position.
    pointer_position: Point,
}

impl PointerTracker {
    /// Create a new tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Abandon the current drag; the next up is ignored.
    pub fn end(&mut self) {
        self.drag_start = None;
    }

    pub fn pointer_position(&self) -> Point {
        self.pointer_position
    }

    /// Process a pointer event, returning the gesture it produces.
    ///
    /// A down only arms the drag. Moves and ups outside a drag are ignored.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<GestureEvent> {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_position = position;
                self.drag_start = Some(position);
                None
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
                let start = self.drag_start?;
                let delta = position - start;
                Some(GestureEvent::Move {
                    dx: delta.x,
                    dy: delta.y,
                })
            }
            PointerEvent::Up { position } => {
                self.pointer_position = position;
                let start = self.drag_start.take()?;
                let delta = position - start;
                Some(GestureEvent::Release {
                    dx: delta.x,
                    dy: delta.y,
                })
            }
        }
    }
}
