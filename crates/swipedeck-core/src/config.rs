//! Deck configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{DeckError, DeckResult};

/// Fraction of the viewport width a drag must exceed to commit.
pub const SWIPE_THRESHOLD_RATIO: f64 = 0.25;
/// Duration of the swipe-out animation.
pub const SWIPE_OUT_DURATION_MS: u64 = 250;
/// Rotation domain half-width, in viewport widths.
pub const ROTATION_SPAN_RATIO: f64 = 1.5;
/// Rotation at the edges of the rotation domain.
pub const MAX_ROTATION_DEGREES: f64 = 120.0;

/// Motion curve for the timed swipe-out animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-in-out.
    EaseInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Spring-damper constants for the snap-back motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Spring stiffness (unit mass).
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
    /// Distance from target below which the spring may come to rest.
    pub rest_displacement: f64,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 170.0,
            damping: 26.0,
            rest_displacement: 0.01,
            rest_speed: 0.01,
        }
    }
}

/// Configuration for a deck session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Width of the viewport the deck is shown in, supplied by the host.
    pub viewport_width: f64,
    pub swipe_threshold_ratio: f64,
    pub swipe_out_duration_ms: u64,
    pub exit_easing: Easing,
    pub rotation_span_ratio: f64,
    pub max_rotation_degrees: f64,
    pub spring: SpringConfig,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            viewport_width: 400.0,
            swipe_threshold_ratio: SWIPE_THRESHOLD_RATIO,
            swipe_out_duration_ms: SWIPE_OUT_DURATION_MS,
            exit_easing: Easing::Linear,
            rotation_span_ratio: ROTATION_SPAN_RATIO,
            max_rotation_degrees: MAX_ROTATION_DEGREES,
            spring: SpringConfig::default(),
        }
    }
}

impl DeckConfig {
    /// Create a config with default constants for the given viewport width.
    pub fn with_viewport_width(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    /// Minimum horizontal drag distance required to commit.
    pub fn swipe_threshold(&self) -> f64 {
        self.swipe_threshold_ratio * self.viewport_width
    }

    pub fn swipe_out_duration(&self) -> Duration {
        Duration::from_millis(self.swipe_out_duration_ms)
    }

    /// Check that the config describes a usable deck.
    pub fn validate(&self) -> DeckResult<()> {
        if !self.viewport_width.is_finite() || self.viewport_width <= 0.0 {
            return Err(DeckError::InvalidConfig(format!(
                "viewport_width must be positive, got {}",
                self.viewport_width
            )));
        }
        if !(self.swipe_threshold_ratio > 0.0 && self.swipe_threshold_ratio <= 1.0) {
            return Err(DeckError::InvalidConfig(format!(
                "swipe_threshold_ratio must be in (0, 1], got {}",
                self.swipe_threshold_ratio
            )));
        }
        if !self.rotation_span_ratio.is_finite() || self.rotation_span_ratio <= 0.0 {
            return Err(DeckError::InvalidConfig(format!(
                "rotation_span_ratio must be positive, got {}",
                self.rotation_span_ratio
            )));
        }
        if !self.max_rotation_degrees.is_finite() {
            return Err(DeckError::InvalidConfig(
                "max_rotation_degrees must be finite".to_string(),
            ));
        }
        let spring = &self.spring;
        if !(spring.stiffness > 0.0 && spring.damping > 0.0) {
            return Err(DeckError::InvalidConfig(format!(
                "spring stiffness and damping must be positive, got {} and {}",
                spring.stiffness, spring.damping
            )));
        }
        if !(spring.rest_displacement > 0.0 && spring.rest_speed > 0.0) {
            return Err(DeckError::InvalidConfig(
                "spring rest thresholds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DeckConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.swipe_threshold() - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.swipe_out_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_bad_viewport_width() {
        for width in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let config = DeckConfig::with_viewport_width(width);
            assert!(matches!(
                config.validate(),
                Err(DeckError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_threshold_ratio() {
        let mut config = DeckConfig::default();
        config.swipe_threshold_ratio = 0.0;
        assert!(config.validate().is_err());
        config.swipe_threshold_ratio = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_spring() {
        let mut config = DeckConfig::default();
        config.spring.damping = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DeckConfig =
            serde_json::from_str(r#"{"viewport_width": 320.0, "exit_easing": "ease_in_out"}"#)
                .unwrap();
        assert!((config.viewport_width - 320.0).abs() < f64::EPSILON);
        assert_eq!(config.exit_easing, Easing::EaseInOut);
        assert_eq!(config.swipe_out_duration_ms, SWIPE_OUT_DURATION_MS);
        assert_eq!(config.spring, SpringConfig::default());
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert!(easing.apply(0.0).abs() < f64::EPSILON);
            assert!((easing.apply(1.0) - 1.0).abs() < f64::EPSILON);
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-12);
        }
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    }
}
