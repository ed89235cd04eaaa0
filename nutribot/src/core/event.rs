//! Normalized inbound events consumed by the conversation engine, decoupled from the
//! transport's dispatch mechanism.

/// Stable identifier for a chat participant (Telegram private chat id).
pub type UserId = i64;

/// Bot command. Fixed catalog, no flags or arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Track,
    View,
    Delete,
    Cancel,
}

impl Command {
    /// Parses the leading token of a message like `/track` or `/track@SomeBot`
    /// (case-insensitive). Returns None for non-commands and commands outside the catalog.
    pub fn parse(text: &str) -> Option<Command> {
        let first = text.trim().split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "track" => Some(Command::Track),
            "view" => Some(Command::View),
            "delete" => Some(Command::Delete),
            "cancel" => Some(Command::Cancel),
            _ => None,
        }
    }
}

/// Payload of a normalized event.
#[derive(Debug, Clone)]
pub enum EventKind {
    Command(Command),
    Text(String),
    Image(Vec<u8>),
}

/// One inbound chat event.
#[derive(Debug, Clone)]
pub struct Event {
    pub user_id: UserId,
    pub kind: EventKind,
}

impl Event {
    pub fn command(user_id: UserId, command: Command) -> Self {
        Self {
            user_id,
            kind: EventKind::Command(command),
        }
    }

    pub fn text(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: EventKind::Text(text.into()),
        }
    }

    pub fn image(user_id: UserId, bytes: Vec<u8>) -> Self {
        Self {
            user_id,
            kind: EventKind::Image(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/track"), Some(Command::Track));
        assert_eq!(Command::parse("/view"), Some(Command::View));
        assert_eq!(Command::parse("/delete"), Some(Command::Delete));
        assert_eq!(Command::parse("/cancel"), Some(Command::Cancel));
    }

    #[test]
    fn parse_strips_bot_suffix_and_ignores_case() {
        assert_eq!(Command::parse("/track@NomNomNutriBot"), Some(Command::Track));
        assert_eq!(Command::parse("/TRACK"), Some(Command::Track));
        assert_eq!(Command::parse("  /cancel  "), Some(Command::Cancel));
    }

    #[test]
    fn parse_rejects_unknown_and_non_commands() {
        assert_eq!(Command::parse("/settings"), None);
        assert_eq!(Command::parse("track"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("/"), None);
    }
}
