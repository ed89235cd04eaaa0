//! # Conversation engine
//!
//! Per-user finite-state machine driving the track/save and delete/confirm flows.
//! Consumes normalized [`Event`]s, mediates every call to the vision and advice clients,
//! and returns the ordered reply texts; the transport layer owns delivery.
//!
//! Collaborator failures (errors, timeouts) degrade to fixed fallback replies and force
//! the session back to Idle; they never escape as errors.

pub mod analysis;
pub mod keyword;
pub mod session;
pub mod texts;

pub use analysis::{filter_food_labels, MealAnalysis, FOOD_TERMS};
pub use keyword::{match_rule, KeywordRule};
pub use session::{ConversationState, InMemorySessionStore, PendingMeal, Session, SessionStore};

use advice_client::{AdviceClient, ChatMessage};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};
use vision_client::{ImageLabel, VisionClient};

use crate::core::{Command, Event, EventKind, NutriError, Result, UserId};
use crate::meals::{format_history, MealRecord, MealStore};

const NUTRITION_SYSTEM_PROMPT: &str = "You are a helpful nutrition assistant.";
const SMALLTALK_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const SMALLTALK_QUESTION: &str = "How are you?";

/// Builds the advice request for a meal description or a detected food list.
fn meal_prompt(description: &str) -> String {
    format!(
        "I ate {}. Please provide nutritional advice including estimated calories.",
        description
    )
}

/// A confirmation counts as "yes" when the trimmed text matches case-insensitively;
/// anything else is the negative branch.
fn is_affirmative(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("yes")
}

/// Conversation engine: owns per-user sessions, mediates all AI calls, and decides reply
/// texts and state transitions.
pub struct ConversationEngine {
    sessions: Arc<dyn SessionStore>,
    meals: Arc<dyn MealStore>,
    advice: Arc<dyn AdviceClient>,
    vision: Arc<dyn VisionClient>,
    ai_timeout: Duration,
    /// Per-user locks: events of one user run to completion in order, while distinct
    /// users proceed concurrently.
    user_locks: RwLock<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl ConversationEngine {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        meals: Arc<dyn MealStore>,
        advice: Arc<dyn AdviceClient>,
        vision: Arc<dyn VisionClient>,
        ai_timeout: Duration,
    ) -> Self {
        Self {
            sessions,
            meals,
            advice,
            vision,
            ai_timeout,
            user_locks: RwLock::new(HashMap::new()),
        }
    }

    async fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        if let Some(lock) = self.user_locks.read().await.get(&user_id) {
            return lock.clone();
        }
        let mut locks = self.user_locks.write().await;
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Handles one inbound event to completion and returns the replies to send, in order.
    /// An ignored event yields no replies.
    #[instrument(skip(self, event), fields(user_id = event.user_id))]
    pub async fn handle_event(&self, event: Event) -> Result<Vec<String>> {
        let lock = self.user_lock(event.user_id).await;
        let _guard = lock.lock().await;

        let user_id = event.user_id;
        let session = self.sessions.get(user_id).await;

        // /cancel aborts whatever flow is active, in any state.
        if let EventKind::Command(Command::Cancel) = event.kind {
            info!(user_id, state = ?session.state, "Operation cancelled by user");
            self.sessions.put(user_id, Session::default()).await;
            return Ok(vec![texts::CANCELLED.to_string()]);
        }

        match session.state {
            ConversationState::Idle => self.handle_idle(user_id, event.kind).await,
            ConversationState::AwaitingMealInput => {
                self.handle_meal_input(user_id, event.kind).await
            }
            ConversationState::AwaitingSaveConfirmation => {
                self.handle_save_confirmation(user_id, session, event.kind).await
            }
            ConversationState::AwaitingDeleteConfirmation => {
                self.handle_delete_confirmation(user_id, event.kind).await
            }
        }
    }

    // ---------- Idle ----------

    async fn handle_idle(&self, user_id: UserId, kind: EventKind) -> Result<Vec<String>> {
        match kind {
            EventKind::Command(Command::Start) => Ok(vec![texts::START.to_string()]),
            EventKind::Command(Command::Help) => Ok(vec![texts::HELP.to_string()]),
            EventKind::Command(Command::Track) => {
                self.sessions
                    .put(
                        user_id,
                        Session {
                            state: ConversationState::AwaitingMealInput,
                            pending: None,
                        },
                    )
                    .await;
                Ok(vec![texts::TRACK_PROMPT.to_string()])
            }
            EventKind::Command(Command::View) => {
                let records = self.list_meals(user_id).await?;
                if records.is_empty() {
                    Ok(vec![texts::EMPTY_HISTORY.to_string()])
                } else {
                    Ok(vec![format_history(&records)])
                }
            }
            EventKind::Command(Command::Delete) => {
                let records = self.list_meals(user_id).await?;
                if records.is_empty() {
                    Ok(vec![texts::NOTHING_TO_DELETE.to_string()])
                } else {
                    self.sessions
                        .put(
                            user_id,
                            Session {
                                state: ConversationState::AwaitingDeleteConfirmation,
                                pending: None,
                            },
                        )
                        .await;
                    Ok(vec![texts::DELETE_PROMPT.to_string()])
                }
            }
            // Intercepted in handle_event; kept for exhaustiveness.
            EventKind::Command(Command::Cancel) => Ok(vec![texts::CANCELLED.to_string()]),
            EventKind::Text(text) => self.smalltalk_reply(&text).await,
            EventKind::Image(_) => {
                info!(user_id, "Ignoring image outside meal tracking");
                Ok(vec![])
            }
        }
    }

    /// Keyword responder for free text in Idle; "how are you" is delegated to the advice
    /// client with a fixed fallback.
    async fn smalltalk_reply(&self, text: &str) -> Result<Vec<String>> {
        let reply = match keyword::match_rule(text) {
            KeywordRule::Greeting => texts::GREETING.to_string(),
            KeywordRule::AskAssistant => {
                let messages = vec![
                    ChatMessage::system(SMALLTALK_SYSTEM_PROMPT),
                    ChatMessage::user(SMALLTALK_QUESTION),
                ];
                match self.generate_advice(messages).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        error!(error = %e, "Small-talk advice call failed");
                        texts::SMALLTALK_FALLBACK.to_string()
                    }
                }
            }
            KeywordRule::Farewell => texts::FAREWELL.to_string(),
            KeywordRule::NotUnderstood => texts::NOT_UNDERSTOOD.to_string(),
        };
        Ok(vec![reply])
    }

    // ---------- Awaiting meal input ----------

    async fn handle_meal_input(&self, user_id: UserId, kind: EventKind) -> Result<Vec<String>> {
        match kind {
            EventKind::Text(text) => {
                let messages = vec![
                    ChatMessage::system(NUTRITION_SYSTEM_PROMPT),
                    ChatMessage::user(meal_prompt(&text)),
                ];
                match self.generate_advice(messages).await {
                    Ok(advice) => self.offer_save(user_id, advice).await,
                    Err(e) => {
                        error!(error = %e, user_id, "Advice call failed for meal description");
                        self.sessions.put(user_id, Session::default()).await;
                        Ok(vec![texts::ADVICE_UNAVAILABLE.to_string()])
                    }
                }
            }
            EventKind::Image(bytes) => match self.analyze_meal_photo(&bytes).await {
                MealAnalysis::Advice { foods, advice } => {
                    info!(user_id, foods = %foods, "Photo analysis recognized foods");
                    self.offer_save(user_id, advice).await
                }
                MealAnalysis::NoFood => {
                    self.sessions.put(user_id, Session::default()).await;
                    Ok(vec![texts::NO_FOOD_FOUND.to_string()])
                }
                MealAnalysis::Failed => {
                    self.sessions.put(user_id, Session::default()).await;
                    Ok(vec![texts::ANALYSIS_UNAVAILABLE.to_string()])
                }
            },
            EventKind::Command(command) => {
                info!(user_id, command = ?command, "Ignoring command while awaiting meal input");
                Ok(vec![])
            }
        }
    }

    /// Records the advice as pending and asks the save question.
    async fn offer_save(&self, user_id: UserId, advice: String) -> Result<Vec<String>> {
        let pending = PendingMeal {
            advice: advice.clone(),
            captured_at: Utc::now(),
        };
        self.sessions
            .put(
                user_id,
                Session {
                    state: ConversationState::AwaitingSaveConfirmation,
                    pending: Some(pending),
                },
            )
            .await;
        Ok(vec![advice, texts::SAVE_PROMPT.to_string()])
    }

    /// Photo pipeline: label detection, whitelist filtering, then advice generation.
    /// Collaborator failures degrade to [`MealAnalysis::Failed`], never an Err.
    async fn analyze_meal_photo(&self, image: &[u8]) -> MealAnalysis {
        let labels = match self.label_image(image).await {
            Ok(labels) => labels,
            Err(e) => {
                error!(error = %e, "Vision labeling failed");
                return MealAnalysis::Failed;
            }
        };

        let foods = analysis::filter_food_labels(&labels);
        if foods.is_empty() {
            info!(label_count = labels.len(), "No recognized food among labels");
            return MealAnalysis::NoFood;
        }
        let foods = foods.join(", ");

        let messages = vec![
            ChatMessage::system(NUTRITION_SYSTEM_PROMPT),
            ChatMessage::user(meal_prompt(&foods)),
        ];
        match self.generate_advice(messages).await {
            Ok(advice) => MealAnalysis::Advice { foods, advice },
            Err(e) => {
                error!(error = %e, "Advice call failed for photo analysis");
                MealAnalysis::Failed
            }
        }
    }

    // ---------- Confirmations ----------

    async fn handle_save_confirmation(
        &self,
        user_id: UserId,
        session: Session,
        kind: EventKind,
    ) -> Result<Vec<String>> {
        match kind {
            EventKind::Text(text) => {
                // Pending is cleared as soon as the question is answered, whatever the answer.
                self.sessions.put(user_id, Session::default()).await;
                if !is_affirmative(&text) {
                    return Ok(vec![texts::MEAL_NOT_SAVED.to_string()]);
                }
                match session.pending {
                    Some(pending) => {
                        let record = MealRecord {
                            advice: pending.advice,
                            captured_at: pending.captured_at,
                        };
                        self.meals
                            .append(user_id, record)
                            .await
                            .map_err(|e| NutriError::Store(e.to_string()))?;
                        info!(user_id, "Meal saved");
                        Ok(vec![texts::MEAL_SAVED.to_string()])
                    }
                    None => {
                        warn!(user_id, "Save confirmed but nothing was pending");
                        Ok(vec![texts::MEAL_NOT_SAVED.to_string()])
                    }
                }
            }
            _ => {
                info!(user_id, "Ignoring non-text event while awaiting save confirmation");
                Ok(vec![])
            }
        }
    }

    async fn handle_delete_confirmation(
        &self,
        user_id: UserId,
        kind: EventKind,
    ) -> Result<Vec<String>> {
        match kind {
            EventKind::Text(text) => {
                self.sessions.put(user_id, Session::default()).await;
                if is_affirmative(&text) {
                    self.meals
                        .clear(user_id)
                        .await
                        .map_err(|e| NutriError::Store(e.to_string()))?;
                    info!(user_id, "Meal history deleted");
                    Ok(vec![texts::HISTORY_DELETED.to_string()])
                } else {
                    Ok(vec![texts::DELETE_CANCELLED.to_string()])
                }
            }
            _ => {
                info!(user_id, "Ignoring non-text event while awaiting delete confirmation");
                Ok(vec![])
            }
        }
    }

    // ---------- Collaborator calls (bounded) ----------

    /// Calls the advice client with the configured timeout; a timeout reports as an error.
    async fn generate_advice(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        match timeout(self.ai_timeout, self.advice.generate(messages)).await {
            Ok(result) => result,
            Err(_) => anyhow::bail!("advice call timed out after {:?}", self.ai_timeout),
        }
    }

    /// Calls the vision client with the configured timeout; a timeout reports as an error.
    async fn label_image(&self, image: &[u8]) -> anyhow::Result<Vec<ImageLabel>> {
        match timeout(self.ai_timeout, self.vision.label_image(image)).await {
            Ok(result) => result,
            Err(_) => anyhow::bail!("vision call timed out after {:?}", self.ai_timeout),
        }
    }

    async fn list_meals(&self, user_id: UserId) -> Result<Vec<MealRecord>> {
        self.meals
            .list(user_id)
            .await
            .map_err(|e| NutriError::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_is_trimmed_and_case_insensitive() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("YES"));
        assert!(is_affirmative("  Yes "));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yes please"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn meal_prompt_embeds_description() {
        assert_eq!(
            meal_prompt("chicken rice"),
            "I ate chicken rice. Please provide nutritional advice including estimated calories."
        );
    }
}
