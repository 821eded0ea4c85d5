//! Command implementations
//!
//! Each module corresponds to one binary entry point.

pub mod history;
pub mod init_session;
pub mod list_chats;

// Re-export commonly used types
pub use history::{run as history_run, HistoryArgs};
pub use list_chats::run as list_chats_run;
