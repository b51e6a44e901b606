//! reqwest-backed implementation of every backend trait.
//!
//! The chat service and the identity service are separate hosts; both take
//! the same bearer credential.

mod chat;
mod client;
mod config;
mod documents;
mod evaluations;
mod identity;

pub use client::HttpBackend;
pub use config::HttpConfig;
