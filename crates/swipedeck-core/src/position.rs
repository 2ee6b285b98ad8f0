//! Position model for the active card.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::DeckConfig;

/// Map a horizontal offset to a card rotation in degrees.
///
/// `x` is mapped linearly from `[-span, 0, span]` to
/// `[-max_degrees, 0, max_degrees]` where `span = span_ratio * viewport_width`.
/// Offsets outside the domain clamp to the endpoints.
pub fn rotation_degrees(x: f64, viewport_width: f64, span_ratio: f64, max_degrees: f64) -> f64 {
    let span = span_ratio * viewport_width;
    if span <= 0.0 {
        return 0.0;
    }
    x.clamp(-span, span) / span * max_degrees
}

/// Animatable drag offset of the active card from its rest position.
///
/// Written by the drag handler and the animator, read by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionModel {
    value: Vec2,
}

impl PositionModel {
    /// Create a position at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset.
    pub fn value(&self) -> Vec2 {
        self.value
    }

    /// Overwrite the offset immediately.
    pub fn set_value(&mut self, x: f64, y: f64) {
        self.value = Vec2::new(x, y);
    }

    /// Snap back to rest.
    pub fn reset(&mut self) {
        self.value = Vec2::ZERO;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == Vec2::ZERO
    }

    /// Rotation derived from the current x offset, in degrees.
    pub fn rotation(&self, config: &DeckConfig) -> f64 {
        rotation_degrees(
            self.value.x,
            config.viewport_width,
            config.rotation_span_ratio,
            config.max_rotation_degrees,
        )
    }

    /// Visual style for the active card at the current offset.
    pub fn card_style(&self, config: &DeckConfig) -> CardStyle {
        CardStyle {
            offset: self.value,
            rotation_degrees: self.rotation(config),
        }
    }
}

/// Offset and rotation to paint the active card with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardStyle {
    pub offset: Vec2,
    pub rotation_degrees: f64,
}

impl CardStyle {
    /// Style of a card at rest.
    pub const REST: Self = Self {
        offset: Vec2::ZERO,
        rotation_degrees: 0.0,
    };

    /// Transform to apply to a card whose layout center is `center`.
    ///
    /// Rotates about the center, then translates by the offset.
    pub fn transform(&self, center: Point) -> Affine {
        Affine::translate(self.offset)
            * Affine::rotate_about(self.rotation_degrees.to_radians(), center)
    }
}
