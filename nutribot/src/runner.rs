//! Composition root: builds clients, stores, and the engine, then runs the Telegram REPL.

use advice_client::OpenAiAdviceClient;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};
use vision_client::GoogleVisionClient;

use crate::config::BotConfig;
use crate::core::init_tracing;
use crate::engine::{ConversationEngine, InMemorySessionStore};
use crate::meals::InMemoryMealStore;
use crate::telegram::{run_repl, TelegramSink};

/// Builds the teloxide Bot, honoring TELEGRAM_API_URL when set.
fn build_telegram_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url.as_deref() {
        Some(url) => Ok(bot.set_api_url(reqwest::Url::parse(url)?)),
        None => Ok(bot),
    }
}

/// Main entry: validate config, init logging, build the engine, run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        model = %config.model,
        ai_timeout_secs = config.ai_timeout_secs,
        "Initializing bot"
    );

    let advice = Arc::new(
        OpenAiAdviceClient::with_base_url(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
        )
        .with_model(config.model.clone()),
    );
    let vision = Arc::new(GoogleVisionClient::with_base_url(
        config.vision_api_key.clone(),
        config.vision_base_url.clone(),
    ));

    let engine = Arc::new(ConversationEngine::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(InMemoryMealStore::new()),
        advice,
        vision,
        config.ai_timeout(),
    ));

    let bot = build_telegram_bot(&config)?;
    let sink = Arc::new(TelegramSink::new(bot.clone()));

    info!("Bot started successfully");

    run_repl(bot, engine, sink).await
}
