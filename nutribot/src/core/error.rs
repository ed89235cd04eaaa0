//! Error types for the bot core.
//!
//! [`NutriError`] is the top-level error. Collaborator (vision/advice) failures are
//! recovered inside the engine and never surface here; these variants cover the
//! transport, config, and store faults that do cross the event boundary.

use thiserror::Error;

/// Top-level error (transport, config, store, IO).
#[derive(Error, Debug)]
pub enum NutriError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`NutriError`].
pub type Result<T> = std::result::Result<T, NutriError>;
