//! Tests for the full validation pipeline.

use super::*;
use crate::schema::BrainbotConfig;

#[test]
fn default_config_validates() {
    let config = BrainbotConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_non_http_chat_url() {
    let mut config = BrainbotConfig::default();
    config.api.chat_url = "localhost:8000".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.chat_url"));
}

#[test]
fn catches_bare_scheme_url() {
    let mut config = BrainbotConfig::default();
    config.api.identity_url = "https://".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.identity_url"));
}

#[test]
fn catches_request_timeout_out_of_range() {
    let mut config = BrainbotConfig::default();
    config.api.request_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.request_timeout_secs"));
}

#[test]
fn catches_zero_typing_interval() {
    let mut config = BrainbotConfig::default();
    config.chat.typing_interval_ms = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.typing_interval_ms"));
}

#[test]
fn catches_blank_welcome_message() {
    let mut config = BrainbotConfig::default();
    config.chat.welcome_message = "   ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.welcome_message"));
}

#[test]
fn catches_short_session_ttl() {
    let mut config = BrainbotConfig::default();
    config.auth.session_ttl_secs = 5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("auth.session_ttl_secs"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = BrainbotConfig::default();
    config.chat.title_interval_ms = 5000;
    config.chat.notification_ttl_ms = 100;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.title_interval_ms"));
    assert!(err.contains("chat.notification_ttl_ms"));
    assert!(err.contains("; "));
}
