//! SwipeDeck Demo
//!
//! Loads a deck and a gesture script from JSON, replays the script against a
//! deck controller and reports what the callbacks saw.

mod error;
mod script;
mod session;

pub use error::{DemoError, DemoResult};
pub use script::{DemoCard, Script, Step, load_cards, load_config, load_script};
pub use session::{FRAME, Session, TextRenderer};
