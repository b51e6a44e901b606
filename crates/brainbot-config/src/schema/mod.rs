//! Configuration schema types for the BrainBot client.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod auth;
mod chat;
mod system;

pub use api::*;
pub use auth::*;
pub use chat::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct BrainbotConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}
