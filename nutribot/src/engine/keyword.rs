//! Keyword responder rules for free-text messages outside any tracked flow.
//! Case-insensitive substring match, fixed priority order, first match wins.

/// Which small-talk rule fired for a free-text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordRule {
    /// Text contains "hello".
    Greeting,
    /// Text contains "how are you"; the reply is delegated to the advice client.
    AskAssistant,
    /// Text contains "bye".
    Farewell,
    /// No rule matched.
    NotUnderstood,
}

/// Matches `text` against the rule set in priority order.
pub fn match_rule(text: &str) -> KeywordRule {
    let processed = text.to_lowercase();
    if processed.contains("hello") {
        KeywordRule::Greeting
    } else if processed.contains("how are you") {
        KeywordRule::AskAssistant
    } else if processed.contains("bye") {
        KeywordRule::Farewell
    } else {
        KeywordRule::NotUnderstood
    }
}
