//! Error types for the history exporter

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Session file not found: {0}")]
    SessionNotFound(String),

    #[error("Session is locked by another process")]
    SessionLocked,

    #[error("Failed to acquire session lock: {0}")]
    LockError(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Telegram API error: {0}")]
    TelegramError(String),

    #[error("Chat not found: {0}")]
    ChatNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<grammers_client::InvocationError> for Error {
    fn from(err: grammers_client::InvocationError) -> Self {
        Error::TelegramError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_session_not_found() {
        let err = Error::SessionNotFound("test.session".to_string());
        assert!(err.to_string().contains("Session file not found"));
        assert!(err.to_string().contains("test.session"));
    }

    #[test]
    fn test_error_display_session_locked() {
        let err = Error::SessionLocked;
        assert!(err.to_string().contains("locked by another process"));
    }

    #[test]
    fn test_error_display_missing_credentials() {
        let err = Error::MissingCredentials("api_id".to_string());
        assert!(err.to_string().contains("Missing credentials"));
        assert!(err.to_string().contains("api_id"));
    }

    #[test]
    fn test_error_display_chat_not_found() {
        let err = Error::ChatNotFound("test_chat".to_string());
        assert!(err.to_string().contains("Chat not found"));
        assert!(err.to_string().contains("test_chat"));
    }

    #[test]
    fn test_error_display_invalid_argument() {
        let err = Error::InvalidArgument("bad offset_date".to_string());
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("bad offset_date"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();

        assert!(matches!(err, Error::SerializationError(_)));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_display_telegram_error() {
        let err = Error::TelegramError("flood wait".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Telegram API error"));
        assert!(msg.contains("flood wait"));
    }

    #[test]
    fn test_error_display_lock_error() {
        let err = Error::LockError("timeout".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Failed to acquire session lock"));
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn test_error_debug_impl() {
        let err = Error::SessionLocked;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("SessionLocked"));
    }

    #[test]
    fn test_error_all_variants_display_non_empty() {
        let variants: Vec<Error> = vec![
            Error::SessionNotFound("session".to_string()),
            Error::SessionLocked,
            Error::LockError("lock".to_string()),
            Error::MissingCredentials("api_hash".to_string()),
            Error::TelegramError("telegram".to_string()),
            Error::ChatNotFound("chat".to_string()),
            Error::SerializationError("serial".to_string()),
            Error::InvalidArgument("arg".to_string()),
        ];

        for err in variants {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_result_type_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<i32> = Err(Error::SessionLocked);
        assert!(result.is_err());
    }
}
