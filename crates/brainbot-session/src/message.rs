use chrono::{DateTime, Utc};

/// One line of dialogue in the message buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Buffer-local sequence number, re-derived on every reload.
    pub id: u64,
    pub text: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(id: u64, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            is_bot: false,
            timestamp,
        }
    }

    pub fn bot(id: u64, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            is_bot: true,
            timestamp,
        }
    }
}

/// Convert literal escape sequences (`\n`, `\t`, `\"`, `\\`) that the chat
/// service leaves in its text into the characters they stand for.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let replacement = match chars.peek() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('"') => '"',
            Some('\\') => '\\',
            _ => {
                out.push(c);
                continue;
            }
        };
        chars.next();
        out.push(replacement);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_escapes() {
        assert_eq!(normalize_text(r"line one\nline two"), "line one\nline two");
        assert_eq!(normalize_text(r"a\tb"), "a\tb");
        assert_eq!(normalize_text(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(normalize_text(r"C:\\temp"), r"C:\temp");
    }

    #[test]
    fn leaves_other_backslashes_alone() {
        assert_eq!(normalize_text(r"\x and \"), r"\x and \");
        assert_eq!(normalize_text("plain"), "plain");
    }

    #[test]
    fn escaped_backslash_before_n_is_not_a_newline() {
        assert_eq!(normalize_text(r"\\n"), r"\n");
    }
}
