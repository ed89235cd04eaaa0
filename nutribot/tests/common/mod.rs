//! Shared test doubles: recording advice/vision clients and an engine builder.

#![allow(dead_code)]

use advice_client::{AdviceClient, ChatMessage};
use async_trait::async_trait;
use nutribot::{ConversationEngine, InMemoryMealStore, InMemorySessionStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vision_client::{ImageLabel, VisionClient};

/// Advice client returning a fixed reply or failing; records every call and the last
/// user prompt so tests can assert on the submitted text.
pub struct MockAdviceClient {
    reply: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockAdviceClient {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            delay: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    /// Succeeds only after `delay`; used to trigger the engine timeout.
    pub fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdviceClient for MockAdviceClient {
    async fn generate(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = messages.last().map(|m| m.content.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => anyhow::bail!("mock advice failure"),
        }
    }
}

/// Vision client returning fixed labels or failing; records call count.
pub struct MockVisionClient {
    labels: Option<Vec<ImageLabel>>,
    calls: AtomicUsize,
}

impl MockVisionClient {
    pub fn labeling(descriptions: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            labels: Some(
                descriptions
                    .iter()
                    .map(|d| ImageLabel {
                        description: d.to_string(),
                        score: 0.9,
                    })
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            labels: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    async fn label_image(&self, _image: &[u8]) -> anyhow::Result<Vec<ImageLabel>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.labels {
            Some(labels) => Ok(labels.clone()),
            None => anyhow::bail!("mock vision failure"),
        }
    }
}

/// Engine over fresh in-memory stores with a generous AI timeout. Returns the stores too
/// so tests can assert history and session state directly.
pub fn build_engine(
    advice: Arc<MockAdviceClient>,
    vision: Arc<MockVisionClient>,
) -> (
    Arc<ConversationEngine>,
    Arc<InMemoryMealStore>,
    Arc<InMemorySessionStore>,
) {
    build_engine_with_timeout(advice, vision, Duration::from_secs(5))
}

pub fn build_engine_with_timeout(
    advice: Arc<MockAdviceClient>,
    vision: Arc<MockVisionClient>,
    ai_timeout: Duration,
) -> (
    Arc<ConversationEngine>,
    Arc<InMemoryMealStore>,
    Arc<InMemorySessionStore>,
) {
    let meals = Arc::new(InMemoryMealStore::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let engine = Arc::new(ConversationEngine::new(
        sessions.clone(),
        meals.clone(),
        advice,
        vision,
        ai_timeout,
    ));
    (engine, meals, sessions)
}
