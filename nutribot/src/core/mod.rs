//! Core model: errors, logging init, and the normalized event types.

pub mod error;
pub mod event;
pub mod logger;

pub use error::{NutriError, Result};
pub use event::{Command, Event, EventKind, UserId};
pub use logger::init_tracing;
