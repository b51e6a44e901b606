//! Validation for `[chat]` and `[auth]`.

use super::helpers::{validate_non_empty, validate_range};
use crate::schema::BrainbotConfig;

pub(crate) fn validate_chat(errors: &mut Vec<String>, config: &BrainbotConfig) {
    let chat = &config.chat;
    validate_non_empty(errors, "chat.welcome_message", &chat.welcome_message);
    validate_non_empty(errors, "chat.error_message", &chat.error_message);
    validate_non_empty(errors, "chat.default_title", &chat.default_title);
    validate_range(errors, "chat.typing_interval_ms", chat.typing_interval_ms, 1, 1000);
    validate_range(errors, "chat.title_interval_ms", chat.title_interval_ms, 1, 1000);
    validate_range(
        errors,
        "chat.notification_ttl_ms",
        chat.notification_ttl_ms,
        500,
        30_000,
    );
}

pub(crate) fn validate_auth(errors: &mut Vec<String>, config: &BrainbotConfig) {
    validate_range(
        errors,
        "auth.session_ttl_secs",
        config.auth.session_ttl_secs,
        60,
        604_800,
    );
    if let Some(ref path) = config.auth.credentials_file {
        validate_non_empty(errors, "auth.credentials_file", path);
    }
}
