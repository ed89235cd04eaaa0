//! REPL runner: converts teloxide messages to normalized events, drives the engine,
//! and sends the replies back through the sink.

use std::sync::Arc;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::PhotoSize;
use tracing::{error, info, instrument};

use super::ReplySink;
use crate::core::{Command, Event, UserId};
use crate::engine::ConversationEngine;

/// Resolves a teloxide message into a normalized [`Event`], downloading photo bytes when
/// needed. Returns None for updates the bot does not consume (stickers, unknown
/// commands, failed downloads).
pub async fn to_event(bot: &teloxide::Bot, msg: &teloxide::types::Message) -> Option<Event> {
    let user_id: UserId = msg.chat.id.0;

    if let Some(photos) = msg.photo() {
        // Telegram sends several sizes; the last one is the largest.
        let photo = photos.last()?;
        return match download_photo(bot, photo).await {
            Ok(bytes) => Some(Event::image(user_id, bytes)),
            Err(e) => {
                error!(error = %e, user_id, "Failed to download photo");
                None
            }
        };
    }

    let text = msg.text()?;
    if text.starts_with('/') {
        match Command::parse(text) {
            Some(command) => Some(Event::command(user_id, command)),
            None => {
                info!(user_id, command = %text, "Ignoring unknown command");
                None
            }
        }
    } else {
        Some(Event::text(user_id, text))
    }
}

async fn download_photo(bot: &teloxide::Bot, photo: &PhotoSize) -> anyhow::Result<Vec<u8>> {
    let file = bot.get_file(photo.file.id.clone()).await?;
    let mut bytes: Vec<u8> = Vec::new();
    bot.download_file(&file.path, &mut bytes).await?;
    Ok(bytes)
}

/// Starts the REPL: each update is converted to an [`Event`] and handled in a spawned
/// task so the REPL returns immediately; the engine serializes events per user.
#[instrument(skip(bot, engine, sink))]
pub async fn run_repl(
    bot: teloxide::Bot,
    engine: Arc<ConversationEngine>,
    sink: Arc<dyn ReplySink>,
) -> anyhow::Result<()> {
    teloxide::repl(bot, move |bot: Bot, msg: teloxide::types::Message| {
        let engine = engine.clone();
        let sink = sink.clone();

        async move {
            let event = match to_event(&bot, &msg).await {
                Some(event) => event,
                None => return Ok(()),
            };
            info!(user_id = event.user_id, "Received event");

            tokio::spawn(async move {
                let user_id = event.user_id;
                match engine.handle_event(event).await {
                    Ok(replies) => {
                        for reply in replies {
                            if let Err(e) = sink.send_text(user_id, &reply).await {
                                error!(error = %e, user_id, "Failed to send reply");
                            }
                        }
                    }
                    Err(e) => {
                        error!(error = %e, user_id, "Engine failed to handle event");
                    }
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
