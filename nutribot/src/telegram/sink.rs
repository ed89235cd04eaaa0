//! Outbound reply sink. Production sends through teloxide; tests substitute a recording impl.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::core::{NutriError, Result, UserId};

/// Abstraction for sending reply texts to a user.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_text(&self, user_id: UserId, text: &str) -> Result<()>;
}

/// Thin wrapper around teloxide::Bot implementing [`ReplySink`].
pub struct TelegramSink {
    bot: teloxide::Bot,
}

impl TelegramSink {
    /// Creates a sink from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send_text(&self, user_id: UserId, text: &str) -> Result<()> {
        // Private chats: the chat id equals the user id.
        self.bot
            .send_message(ChatId(user_id), text.to_string())
            .await
            .map_err(|e| NutriError::Transport(e.to_string()))?;
        Ok(())
    }
}
