//! Telegram Chat History Exporter Library
//!
//! This library provides tools to:
//! - Authenticate against the Telegram API with an MTProto session
//! - Resolve a chat by alias, numeric ID, username or dialog title
//! - Fetch the message history of a chat with limit and date filters
//! - Serialize retrieved messages to a JSON file

pub mod chat;
pub mod config;
pub mod error;
pub mod export;
pub mod record;
pub mod session;

// Re-export common types
pub use config::{ChatEntity, Config};
pub use error::{Error, Result};
pub use record::MessageRecord;
pub use session::{check_session_exists, get_client, SessionLock};

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
