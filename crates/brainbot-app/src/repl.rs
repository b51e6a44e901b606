//! Line parsing and incremental output for the interactive chat.

use brainbot_api::ConversationSummary;
use brainbot_common::{ConversationId, Event};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Message(String),
    New,
    List,
    Switch(String),
    Delete(Option<String>),
    History,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        let Some(command) = line.strip_prefix('/') else {
            return ReplCommand::Message(line.to_string());
        };

        let mut parts = command.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        match (name, arg) {
            ("new", _) => ReplCommand::New,
            ("list" | "ls", _) => ReplCommand::List,
            ("switch" | "open", Some(target)) => ReplCommand::Switch(target),
            ("delete" | "rm", target) => ReplCommand::Delete(target),
            ("history", _) => ReplCommand::History,
            ("help" | "?", _) => ReplCommand::Help,
            ("quit" | "exit" | "q", _) => ReplCommand::Quit,
            _ => ReplCommand::Unknown(line.to_string()),
        }
    }
}

/// `target` is a 1-based position in `conversations` or a literal id.
pub fn resolve_target(target: &str, conversations: &[ConversationSummary]) -> ConversationId {
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| conversations.get(i))
        .map(|c| c.id.clone())
        .unwrap_or_else(|| ConversationId::new(target))
}

/// Prints the revealed response as it grows.
#[derive(Debug, Default)]
pub struct TypingPrinter {
    printed: usize,
}

impl TypingPrinter {
    /// Text of `event` not yet written to the terminal.
    pub fn unseen<'a>(&mut self, event: &'a Event) -> Option<&'a str> {
        let Event::Typing { partial } = event else {
            return None;
        };
        if partial.len() < self.printed || !partial.is_char_boundary(self.printed) {
            // A new animation started over.
            self.printed = 0;
        }
        let fresh = &partial[self.printed..];
        self.printed = partial.len();
        Some(fresh)
    }

    pub fn started(&self) -> bool {
        self.printed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn plain_lines_are_messages() {
        assert_eq!(
            ReplCommand::parse("  hello there "),
            ReplCommand::Message("hello there".into())
        );
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn slash_commands() {
        assert_eq!(ReplCommand::parse("/new"), ReplCommand::New);
        assert_eq!(ReplCommand::parse("/list"), ReplCommand::List);
        assert_eq!(ReplCommand::parse("/switch 2"), ReplCommand::Switch("2".into()));
        assert_eq!(ReplCommand::parse("/delete"), ReplCommand::Delete(None));
        assert_eq!(
            ReplCommand::parse("/delete c9"),
            ReplCommand::Delete(Some("c9".into()))
        );
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
        assert_eq!(
            ReplCommand::parse("/switch"),
            ReplCommand::Unknown("/switch".into())
        );
        assert_eq!(
            ReplCommand::parse("/frobnicate"),
            ReplCommand::Unknown("/frobnicate".into())
        );
    }

    #[test]
    fn targets_resolve_by_position_or_id() {
        let convs: Vec<ConversationSummary> = ["a", "b"]
            .iter()
            .map(|id| ConversationSummary {
                id: ConversationId::new(*id),
                title: None,
                created_at: Utc::now(),
            })
            .collect();
        assert_eq!(resolve_target("2", &convs), ConversationId::new("b"));
        assert_eq!(resolve_target("0", &convs), ConversationId::new("0"));
        assert_eq!(resolve_target("9", &convs), ConversationId::new("9"));
        assert_eq!(resolve_target("xyz", &convs), ConversationId::new("xyz"));
    }

    #[test]
    fn printer_emits_only_new_suffix() {
        let mut printer = TypingPrinter::default();
        let typing = |s: &str| Event::Typing {
            partial: s.to_string(),
        };

        let e = typing("h");
        assert_eq!(printer.unseen(&e), Some("h"));
        let e = typing("hel");
        assert_eq!(printer.unseen(&e), Some("el"));
        assert!(printer.started());
        assert_eq!(printer.unseen(&Event::MessagesChanged), None);

        // A shorter partial means a new animation.
        let e = typing("o");
        assert_eq!(printer.unseen(&e), Some("o"));
    }
}
