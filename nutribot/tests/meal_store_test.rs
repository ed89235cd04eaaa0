//! Unit tests for the in-memory meal store: ordering, clear semantics, user isolation.

use chrono::Utc;
use nutribot::{InMemoryMealStore, MealRecord, MealStore};

fn record(advice: &str) -> MealRecord {
    MealRecord {
        advice: advice.to_string(),
        captured_at: Utc::now(),
    }
}

/// **Test: append preserves insertion order.**
#[tokio::test]
async fn append_preserves_order() {
    let store = InMemoryMealStore::new();
    for advice in ["first", "second", "third"] {
        store.append(1, record(advice)).await.unwrap();
    }

    let records = store.list(1).await.unwrap();
    let advices: Vec<&str> = records.iter().map(|r| r.advice.as_str()).collect();
    assert_eq!(advices, vec!["first", "second", "third"]);
}

/// **Test: list for an unknown user is empty, not an error.**
#[tokio::test]
async fn list_unknown_user_is_empty() {
    let store = InMemoryMealStore::new();
    assert!(store.list(99).await.unwrap().is_empty());
}

/// **Test: clear empties the sequence and is idempotent.**
#[tokio::test]
async fn clear_empties_and_is_idempotent() {
    let store = InMemoryMealStore::new();
    store.append(1, record("meal")).await.unwrap();

    store.clear(1).await.unwrap();
    assert!(store.list(1).await.unwrap().is_empty());

    store.clear(1).await.unwrap();
    assert!(store.list(1).await.unwrap().is_empty());
}

/// **Test: clear for a user with no history is a no-op.**
#[tokio::test]
async fn clear_unknown_user_is_noop() {
    let store = InMemoryMealStore::new();
    store.clear(99).await.unwrap();
    assert!(store.list(99).await.unwrap().is_empty());
}

/// **Test: append after clear starts a fresh ordered sequence.**
#[tokio::test]
async fn append_after_clear_starts_fresh() {
    let store = InMemoryMealStore::new();
    store.append(1, record("old a")).await.unwrap();
    store.append(1, record("old b")).await.unwrap();
    store.clear(1).await.unwrap();

    store.append(1, record("fresh")).await.unwrap();
    let records = store.list(1).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].advice, "fresh");
}

/// **Test: users do not share history.**
#[tokio::test]
async fn users_have_separate_histories() {
    let store = InMemoryMealStore::new();
    store.append(1, record("mine")).await.unwrap();
    store.append(2, record("yours")).await.unwrap();

    store.clear(1).await.unwrap();
    assert!(store.list(1).await.unwrap().is_empty());
    assert_eq!(store.list(2).await.unwrap().len(), 1);
}
