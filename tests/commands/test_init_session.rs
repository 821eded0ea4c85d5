//! Tests for the init_session command

use telegram_history::config::Config;

#[test]
fn test_session_file_name_follows_config() {
    let config = Config::new();
    let session_file = format!("{}.session", config.session_name);
    assert!(session_file.ends_with(".session"));
}

#[tokio::test]
#[ignore] // Mutates the working directory's session file
async fn test_init_session_fails_without_credentials() {
    use telegram_history::commands::init_session;
    use telegram_history::error::Error;

    let _lock = super::support::ENV_LOCK.lock().unwrap();
    let _guards = [
        super::support::EnvGuard::unset("TELEGRAM_API_ID"),
        super::support::EnvGuard::unset("TELEGRAM_API_HASH"),
        super::support::EnvGuard::unset("TELEGRAM_PHONE"),
    ];

    let result = init_session::run().await;
    assert!(matches!(result, Err(Error::MissingCredentials(_))));
}
