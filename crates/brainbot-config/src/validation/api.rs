//! Validation for `[api]`.

use super::helpers::{validate_range, validate_url};
use crate::schema::BrainbotConfig;

pub(crate) fn validate_api(errors: &mut Vec<String>, config: &BrainbotConfig) {
    let api = &config.api;
    validate_url(errors, "api.chat_url", &api.chat_url);
    validate_url(errors, "api.identity_url", &api.identity_url);
    validate_url(errors, "api.documents_url", &api.documents_url);
    validate_range(
        errors,
        "api.connect_timeout_secs",
        api.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "api.request_timeout_secs",
        api.request_timeout_secs,
        1,
        600,
    );
}
