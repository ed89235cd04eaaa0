//! Per-user conversation session: state, pending meal, and the session store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::UserId;

/// Step of a user's multi-turn interaction. A user with no session entry is Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingMealInput,
    AwaitingSaveConfirmation,
    AwaitingDeleteConfirmation,
}

/// Advice not yet committed to the meal history, awaiting the user's save decision.
/// Cleared as soon as the confirmation is answered, whatever the answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMeal {
    pub advice: String,
    pub captured_at: DateTime<Utc>,
}

/// Per-user session record.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub state: ConversationState,
    pub pending: Option<PendingMeal>,
}

/// Session storage keyed by user. Implementations must be safe for concurrent use
/// across users; the engine serializes accesses of a single user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: UserId) -> Session;
    async fn put(&self, user_id: UserId, session: Session);
}

type SessionMap = HashMap<UserId, Session>;

/// In-memory session store.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<SessionMap>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: UserId) -> Session {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn put(&self, user_id: UserId, session: Session) {
        let mut sessions = self.sessions.write().await;
        // Idle with nothing pending equals the default; drop the entry instead of keeping it.
        if session.state == ConversationState::Idle && session.pending.is_none() {
            sessions.remove(&user_id);
        } else {
            sessions.insert(user_id, session);
        }
    }
}
