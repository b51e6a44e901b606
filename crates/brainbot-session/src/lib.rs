//! Conversation and session state for the BrainBot chat view.
//!
//! The [`SessionController`] owns a [`ConversationStore`], a [`MessageBuffer`]
//! and a [`TypingAnimator`], and drives them through the message send flow:
//! optimistic append, optional conversation provisioning, the backend round
//! trip, animated reveal, and reconciliation against the server's history.
//! Views observe state through the shared [`brainbot_common::EventBus`].

pub mod animator;
pub mod buffer;
pub mod controller;
pub mod message;
pub mod store;

#[cfg(test)]
mod test_support;

pub use animator::{AnimationHandle, AnimationOutcome, TypingAnimator};
pub use buffer::MessageBuffer;
pub use controller::{NewChatOutcome, SessionController, SessionSettings, SubmitOutcome};
pub use message::{normalize_text, Message};
pub use store::ConversationStore;
