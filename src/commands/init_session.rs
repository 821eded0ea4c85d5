//! Session initialization command
//!
//! Creates the MTProto session file the other commands require.

use std::io::{self, Write};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::get_client_for_init;

pub async fn run() -> Result<()> {
    let config = Config::new();
    config.require_credentials()?;

    if config.phone.is_empty() {
        return Err(Error::MissingCredentials(
            "phone is not set; add it to config.yml or set TELEGRAM_PHONE".to_string(),
        ));
    }

    println!(
        r#"
WARNING: this will create a NEW Telegram session for {}.

Creating a new session logs you out of other sessions created by this
tool. Type 'YES' (uppercase) to continue: "#,
        config.phone
    );

    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim() != "YES" {
        println!("\nCancelled. No session file was created.");
        return Ok(());
    }

    println!("\nCreating a new session for {}...", config.phone);
    println!("Waiting for the confirmation code from Telegram...\n");

    // Connect without existing session
    let client = get_client_for_init(&config).await?;

    // Request login code
    let token = client
        .request_login_code(&config.phone, &config.api_hash)
        .await
        .map_err(|e| Error::TelegramError(format!("Failed to request code: {}", e)))?;

    println!("Enter the code from Telegram: ");
    io::stdout().flush()?;

    let mut code = String::new();
    io::stdin().read_line(&mut code)?;
    let code = code.trim();

    // Sign in
    let user = client
        .sign_in(&token, code)
        .await
        .map_err(|e| Error::TelegramError(format!("Failed to sign in: {}", e)))?;

    // Session is auto-saved by SqliteSession

    println!(
        r#"
Session created successfully.

Profile:
  Name: {}
  Username: @{}

Session file: {}.session

You can now run the export commands; they will pick up this session
automatically. Do not run init_session again unless you want to replace it.
"#,
        user.full_name(),
        user.username().unwrap_or("not set"),
        config.session_name,
    );

    Ok(())
}
