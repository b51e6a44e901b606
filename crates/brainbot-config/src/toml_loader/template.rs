//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# BrainBot client configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
# chat_url = "http://localhost:8000"       # conversations + messages
# identity_url = "http://localhost:3000"   # login, passwords, users
# documents_url = "http://localhost:3000"  # document upload/list/delete
# connect_timeout_secs = 10                # 1-120
# request_timeout_secs = 120               # 1-600

[chat]
# welcome_message = "Hello! I'm BrainBot, your AI assistant. How can I help you today?"
# error_message = "Sorry, there was an error."
# default_title = "Untitled"
# typing_interval_ms = 20                  # 1-1000
# title_interval_ms = 50                   # 1-1000
# notification_ttl_ms = 2000               # 500-30000

[auth]
# session_ttl_secs = 3600                  # 60-604800
# credentials_file = "/path/to/session.json"
# on_unauthorized = "reauthenticate"       # reauthenticate | pass-through

[logging]
level = "INFO"                             # DEBUG | INFO | WARNING | ERROR
"##
    .to_string()
}
