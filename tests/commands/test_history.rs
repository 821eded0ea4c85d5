//! Tests for the history command

use std::path::PathBuf;

use telegram_history::commands::history::{parse_offset_date, run, HistoryArgs};
use telegram_history::error::Error;

#[test]
fn test_offset_date_default_parses() {
    assert!(parse_offset_date("1970-01-01").is_ok());
}

#[test]
fn test_offset_date_rejects_non_iso() {
    assert!(parse_offset_date("01-01-2024").is_err());
    assert!(parse_offset_date("").is_err());
}

#[test]
fn test_default_output_path() {
    let args = HistoryArgs {
        chat_name: "alpha".to_string(),
        api_id: None,
        api_hash: None,
        file: PathBuf::from("history.json"),
        limit: 100,
        offset_date: "1970-01-01".to_string(),
    };
    assert_eq!(args.file.file_name().unwrap(), "history.json");
}

#[tokio::test]
async fn test_run_fails_without_credentials() {
    // No CLI credentials and (in a test environment) no config/env ones;
    // the command must fail before writing any file.
    let temp = tempfile::tempdir().unwrap();
    let out = temp.path().join("history.json");

    let _lock = super::support::ENV_LOCK.lock().unwrap();
    let _guards = [
        super::support::EnvGuard::unset("TELEGRAM_API_ID"),
        super::support::EnvGuard::unset("TELEGRAM_API_HASH"),
    ];

    let result = run(HistoryArgs {
        chat_name: "anything".to_string(),
        api_id: None,
        api_hash: None,
        file: out.clone(),
        limit: 10,
        offset_date: "1970-01-01".to_string(),
    })
    .await;

    assert!(matches!(result, Err(Error::MissingCredentials(_))));
    assert!(!out.exists(), "no output file may be written on failure");
}

#[tokio::test]
async fn test_run_fails_on_bad_offset_date() {
    let result = run(HistoryArgs {
        chat_name: "anything".to_string(),
        api_id: Some(1),
        api_hash: Some("hash".to_string()),
        file: PathBuf::from("unused.json"),
        limit: 10,
        offset_date: "not-a-date".to_string(),
    })
    .await;

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[tokio::test]
#[ignore] // Requires Telegram connection
async fn test_run_requires_valid_session() {
    let result = run(HistoryArgs {
        chat_name: "nonexistent_chat".to_string(),
        api_id: Some(1),
        api_hash: Some("hash".to_string()),
        file: PathBuf::from("history.json"),
        limit: 10,
        offset_date: "1970-01-01".to_string(),
    })
    .await;

    // Expect session or connection error
    assert!(result.is_err());
}
