//! Errors raised while loading and replaying a session.

use swipedeck_core::DeckError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid JSON in {path}: {message}")]
    Parse { path: String, message: String },
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("Usage: {0}")]
    Usage(String),
}

pub type DemoResult<T> = Result<T, DemoError>;
