//! Error types for deck operations.

use thiserror::Error;

/// Deck errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeckError {
    #[error("Deck exhausted: index {index} of {len} items")]
    Exhausted { index: usize, len: usize },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for deck operations.
pub type DeckResult<T> = Result<T, DeckError>;
