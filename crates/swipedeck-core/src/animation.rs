//! Swipe animator: drives the position model toward a target.
//!
//! Two motion styles are supported:
//! - **Timed**: fixed duration, eased interpolation. Carries a completion
//!   token that is handed back exactly once, on the tick that reaches the
//!   target.
//! - **Spring**: spring-damper convergence with no fixed duration. It has no
//!   completion token; it simply stops once the value is at rest.
//!
//! Starting a new animation replaces the one in flight. A replaced animation
//! never resolves its completion.

use kurbo::Vec2;
use std::time::Duration;

use crate::config::{Easing, SpringConfig};
use crate::position::PositionModel;

/// Largest integration step for spring motion, in seconds.
const MAX_SPRING_STEP: f64 = 1.0 / 240.0;

/// Integration step that keeps semi-implicit Euler stable for `config`.
///
/// Bounded by both the natural period (`1 / sqrt(k)`) and the damping time
/// constant (`1 / c`).
fn spring_step(config: &SpringConfig) -> f64 {
    MAX_SPRING_STEP
        .min(0.5 / config.stiffness.sqrt())
        .min(1.0 / config.damping)
}

#[derive(Debug, Clone)]
enum Motion {
    Timed {
        duration: Duration,
        elapsed: Duration,
        easing: Easing,
    },
    Spring {
        config: SpringConfig,
        velocity: Vec2,
    },
}

#[derive(Debug, Clone)]
struct ActiveAnimation<C> {
    from: Vec2,
    target: Vec2,
    motion: Motion,
    completion: Option<C>,
}

/// Drives a [`PositionModel`] toward a target over successive ticks.
///
/// `C` is the completion token resolved by timed animations.
#[derive(Debug, Clone)]
pub struct SwipeAnimator<C> {
    active: Option<ActiveAnimation<C>>,
}

impl<C> Default for SwipeAnimator<C> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<C> SwipeAnimator<C> {
    /// Create an idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Check if the in-flight animation still owes a completion.
    pub fn has_pending_completion(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|animation| animation.completion.is_some())
    }

    /// Target of the in-flight animation, if any.
    pub fn target(&self) -> Option<Vec2> {
        self.active.as_ref().map(|animation| animation.target)
    }

    /// Start a fixed-duration animation toward `target`.
    ///
    /// `completion` is returned from [`tick`](Self::tick) once the target is
    /// reached.
    pub fn animate_timed(
        &mut self,
        position: &PositionModel,
        target: Vec2,
        duration: Duration,
        easing: Easing,
        completion: C,
    ) {
        self.start(ActiveAnimation {
            from: position.value(),
            target,
            motion: Motion::Timed {
                duration,
                elapsed: Duration::ZERO,
                easing,
            },
            completion: Some(completion),
        });
    }

    /// Start a spring animation toward `target`.
    pub fn animate_spring(&mut self, position: &PositionModel, target: Vec2, config: SpringConfig) {
        self.start(ActiveAnimation {
            from: position.value(),
            target,
            motion: Motion::Spring {
                config,
                velocity: Vec2::ZERO,
            },
            completion: None,
        });
    }

    /// Stop the in-flight animation where it is.
    pub fn cancel(&mut self) {
        if let Some(animation) = self.active.take() {
            if animation.completion.is_some() {
                log::debug!("Cancelled animation with a pending completion");
            }
        }
    }

    fn start(&mut self, animation: ActiveAnimation<C>) {
        if self.has_pending_completion() {
            log::debug!("Preempting animation with a pending completion");
        }
        self.active = Some(animation);
    }

    /// Advance the in-flight animation by `dt`, writing the new value into
    /// `position`.
    ///
    /// Returns the completion token on the tick a timed animation finishes.
    pub fn tick(&mut self, position: &mut PositionModel, dt: Duration) -> Option<C> {
        let animation = self.active.as_mut()?;

        let finished = match &mut animation.motion {
            Motion::Timed {
                duration,
                elapsed,
                easing,
            } => {
                *elapsed += dt;
                if *elapsed >= *duration || animation.from == animation.target {
                    true
                } else {
                    let t = easing.apply(elapsed.as_secs_f64() / duration.as_secs_f64());
                    let value = animation.from.lerp(animation.target, t);
                    position.set_value(value.x, value.y);
                    false
                }
            }
            Motion::Spring { config, velocity } => {
                let mut current = position.value();
                let mut remaining = dt.as_secs_f64();
                let max_step = spring_step(config);
                while remaining > 0.0 {
                    let step = remaining.min(max_step);
                    let spring_force = (animation.target - current) * config.stiffness;
                    let damping_force = *velocity * -config.damping;
                    *velocity += (spring_force + damping_force) * step;
                    current += *velocity * step;
                    remaining -= step;
                }
                position.set_value(current.x, current.y);

                (animation.target - current).hypot() < config.rest_displacement
                    && velocity.hypot() < config.rest_speed
            }
        };

        if !finished {
            return None;
        }

        let mut animation = self.active.take()?;
        position.set_value(animation.target.x, animation.target.y);
        log::trace!("Animation reached target {:?}", animation.target);
        animation.completion.take()
    }
}
