//! OpenAI implementation of [`AdviceClient`]: wraps async-openai chat completions.

use anyhow::Result;
use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{chat_message_to_openai, AdviceClient, ChatMessage};

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Advice client backed by the OpenAI Chat Completions API.
#[derive(Clone)]
pub struct OpenAiAdviceClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiAdviceClient {
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Points the client at an OpenAI-compatible base URL (also used by tests with a mock server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl AdviceClient for OpenAiAdviceClient {
    #[instrument(skip(self, messages))]
    async fn generate(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;

        info!(
            model = %self.model,
            message_count = openai_messages.len(),
            "Submitting chat completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(openai_messages)
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(choice) = response.choices.first() {
            let content = choice.message.content.clone().unwrap_or_default();
            Ok(content.trim().to_string())
        } else {
            anyhow::bail!("No choices in completion response")
        }
    }
}
