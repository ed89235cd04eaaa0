//! Meal history: record type, store trait, in-memory implementation, and /view formatting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::core::UserId;

/// A saved meal: advice text plus capture time. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub advice: String,
    pub captured_at: DateTime<Utc>,
}

/// Per-user meal history storage. `append` preserves insertion order; `clear` empties the
/// sequence (idempotent, keeps the key); `list` returns the ordered sequence, empty for
/// unknown users. Individual records cannot be deleted.
#[async_trait]
pub trait MealStore: Send + Sync {
    async fn append(&self, user_id: UserId, record: MealRecord) -> Result<(), anyhow::Error>;
    async fn clear(&self, user_id: UserId) -> Result<(), anyhow::Error>;
    async fn list(&self, user_id: UserId) -> Result<Vec<MealRecord>, anyhow::Error>;
}

type MealMap = HashMap<UserId, Vec<MealRecord>>;

/// In-memory meal store; history lives for the process lifetime.
#[derive(Clone, Default)]
pub struct InMemoryMealStore {
    meals: Arc<RwLock<MealMap>>,
}

impl InMemoryMealStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MealStore for InMemoryMealStore {
    async fn append(&self, user_id: UserId, record: MealRecord) -> Result<(), anyhow::Error> {
        let mut meals = self.meals.write().await;
        let records = meals.entry(user_id).or_default();
        records.push(record);
        info!(user_id, meal_count = records.len(), "Meal appended to history");
        Ok(())
    }

    async fn clear(&self, user_id: UserId) -> Result<(), anyhow::Error> {
        let mut meals = self.meals.write().await;
        if let Some(records) = meals.get_mut(&user_id) {
            records.clear();
        }
        info!(user_id, "Meal history cleared");
        Ok(())
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<MealRecord>, anyhow::Error> {
        let meals = self.meals.read().await;
        Ok(meals.get(&user_id).cloned().unwrap_or_default())
    }
}

/// Renders the /view reply body for a non-empty history: one block per meal, oldest first.
pub fn format_history(records: &[MealRecord]) -> String {
    let blocks: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "Timestamp: {}\n\n{}",
                r.captured_at.format("%Y-%m-%d %H:%M:%S"),
                r.advice
            )
        })
        .collect();
    format!("Your meal history:\n\n{}", blocks.join("\n\n"))
}
