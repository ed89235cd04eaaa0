//! # NomNom NutriBot
//!
//! Telegram nutrition-tracking bot. Wires the conversation engine, the advice and vision
//! clients, and the in-memory meal history; loads config from env and runs the REPL.
//! Core (events, errors), engine (state machine), and telegram (REPL, sink) are split the
//! same way the inbound/outbound transport seams run.

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod meals;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
pub use core::{init_tracing, Command, Event, EventKind, NutriError, Result, UserId};
pub use engine::{
    ConversationEngine, ConversationState, InMemorySessionStore, PendingMeal, Session,
    SessionStore,
};
pub use meals::{format_history, InMemoryMealStore, MealRecord, MealStore};
pub use runner::run_bot;
pub use telegram::{run_repl, ReplySink, TelegramSink};
