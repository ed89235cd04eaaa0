//! Bot configuration: Telegram connection, AI service credentials, timeout, logging.
//! Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Full bot config. Use [`BotConfig::load`] for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL (optional; e.g. a local API server or test mock)
    pub telegram_api_url: Option<String>,
    /// OPENAI_API_KEY
    pub openai_api_key: String,
    /// OPENAI_BASE_URL
    pub openai_base_url: String,
    /// MODEL
    pub model: String,
    /// GOOGLE_VISION_API_KEY
    pub vision_api_key: String,
    /// GOOGLE_VISION_URL
    pub vision_base_url: String,
    /// AI_TIMEOUT_SECS: upper bound for a single vision or advice call
    pub ai_timeout_secs: u64,
    /// Log file path
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    /// Call validate() after load to fail fast before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        let vision_api_key =
            env::var("GOOGLE_VISION_API_KEY").context("GOOGLE_VISION_API_KEY not set")?;
        let vision_base_url = env::var("GOOGLE_VISION_URL")
            .unwrap_or_else(|_| "https://vision.googleapis.com".to_string());
        let ai_timeout_secs = env::var("AI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/nutribot.log".to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            openai_api_key,
            openai_base_url,
            model,
            vision_api_key,
            vision_base_url,
            ai_timeout_secs,
            log_file,
        })
    }

    /// Validate config (configured URLs must parse). Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("OPENAI_BASE_URL", Some(self.openai_base_url.as_str())),
            ("GOOGLE_VISION_URL", Some(self.vision_base_url.as_str())),
            ("TELEGRAM_API_URL", self.telegram_api_url.as_deref()),
        ];
        for (name, url) in urls {
            if let Some(url) = url {
                if reqwest::Url::parse(url).is_err() {
                    anyhow::bail!("{} is set but not a valid URL: {}", name, url);
                }
            }
        }
        Ok(())
    }

    /// Upper bound for one vision or advice call.
    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }
}
