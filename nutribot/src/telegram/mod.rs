//! Telegram transport: outbound reply sink, inbound update conversion, and the REPL runner.

pub mod runner;
pub mod sink;

pub use runner::{run_repl, to_event};
pub use sink::{ReplySink, TelegramSink};
