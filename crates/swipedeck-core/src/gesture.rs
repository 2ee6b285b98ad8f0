//! Gesture interpretation: live drag tracking and the release decision.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

use crate::animation::SwipeAnimator;
use crate::config::DeckConfig;
use crate::position::PositionModel;

/// Direction of a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Sign of the horizontal exit offset.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Cumulative drag delta reported by the host's gesture system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureEvent {
    /// Pointer moved while dragging; delta since the drag started.
    Move { dx: f64, dy: f64 },
    /// Pointer lifted; final delta since the drag started.
    Release { dx: f64, dy: f64 },
}

/// Outcome of a drag release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseDecision {
    Commit(SwipeDirection),
    Cancel,
}

/// Turns drag samples into position updates and release decisions.
///
/// Holds no per-drag state; it borrows the deck config and operates on the
/// position and animator it is handed.
#[derive(Debug, Clone, Copy)]
pub struct GestureInterpreter<'a> {
    config: &'a DeckConfig,
}

impl<'a> GestureInterpreter<'a> {
    pub fn new(config: &'a DeckConfig) -> Self {
        Self { config }
    }

    /// Minimum horizontal distance a release must exceed to commit.
    pub fn threshold(&self) -> f64 {
        self.config.swipe_threshold()
    }

    /// Reflect a drag sample on the position. No threshold check.
    pub fn on_drag_move(&self, position: &mut PositionModel, dx: f64, dy: f64) {
        position.set_value(dx, dy);
    }

    /// Decide commit or cancel from the final horizontal delta.
    ///
    /// The comparison is strict; a release exactly at the threshold cancels.
    /// Vertical movement never commits.
    pub fn decide(&self, dx: f64) -> ReleaseDecision {
        let threshold = self.threshold();
        if dx > threshold {
            ReleaseDecision::Commit(SwipeDirection::Right)
        } else if dx < -threshold {
            ReleaseDecision::Commit(SwipeDirection::Left)
        } else {
            ReleaseDecision::Cancel
        }
    }

    /// Decide the release and start the matching animation.
    ///
    /// A commit runs a timed exit to `(+-viewport_width, 0)` that resolves
    /// with the swipe direction. A cancel springs back to the origin.
    pub fn on_drag_release(
        &self,
        position: &mut PositionModel,
        animator: &mut SwipeAnimator<SwipeDirection>,
        dx: f64,
        dy: f64,
    ) -> ReleaseDecision {
        position.set_value(dx, dy);
        let decision = self.decide(dx);
        match decision {
            ReleaseDecision::Commit(direction) => {
                let exit = Vec2::new(direction.sign() * self.config.viewport_width, 0.0);
                animator.animate_timed(
                    position,
                    exit,
                    self.config.swipe_out_duration(),
                    self.config.exit_easing,
                    direction,
                );
            }
            ReleaseDecision::Cancel => {
                animator.animate_spring(position, Vec2::ZERO, self.config.spring);
            }
        }
        decision
    }
}
