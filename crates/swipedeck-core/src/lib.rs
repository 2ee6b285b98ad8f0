//! SwipeDeck Core Library
//!
//! Platform-agnostic gesture, animation and deck state logic for swipeable
//! card decks. Rendering layers feed pointer events and frame ticks in, and
//! read back card positions, rotations and lifecycle callbacks.

pub mod animation;
pub mod config;
pub mod controller;
pub mod deck;
pub mod error;
pub mod gesture;
pub mod pointer;
pub mod position;
pub mod render;

pub use animation::SwipeAnimator;
pub use config::{DeckConfig, Easing, SpringConfig};
pub use controller::{DeckCallbacks, DeckController, DeckPhase};
pub use deck::{DeckItem, DeckState};
pub use error::{DeckError, DeckResult};
pub use gesture::{GestureEvent, GestureInterpreter, ReleaseDecision, SwipeDirection};
pub use pointer::{PointerEvent, PointerTracker};
pub use position::{CardStyle, PositionModel, rotation_degrees};
pub use render::{CardPlacement, CardRenderer, Frame};
