pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;

pub use errors::{BrainbotError, ConfigError};
pub use events::{Event, EventBus};
pub use id::{new_correlation_id, ConversationId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};

pub type Result<T> = std::result::Result<T, BrainbotError>;
