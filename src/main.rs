//! Telegram history exporter - main entry point
//!
//! Fetches the message history of one named chat or channel and
//! serializes the retrieved messages to a JSON file.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use telegram_history::commands::{self, HistoryArgs};
use telegram_history::config::{DEFAULT_LIMIT, DEFAULT_OFFSET_DATE, DEFAULT_OUTPUT_FILE};

#[derive(Parser)]
#[command(name = "telegram_history")]
#[command(about = "Get the history of a Telegram chat or channel", long_about = None)]
#[command(version)]
struct Cli {
    /// The name of the chat for which you want to get the history
    /// (config alias, numeric ID, @username or part of a dialog title)
    chat_name: String,

    /// Your API ID
    #[arg(long = "api_id", env = "TELEGRAM_API_ID")]
    api_id: Option<i32>,

    /// Your API hash
    #[arg(long = "api_hash", env = "TELEGRAM_API_HASH")]
    api_hash: Option<String>,

    /// Output file for the retrieved history
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    file: PathBuf,

    /// The maximum number of messages to retrieve
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// The date from which the history should be retrieved (YYYY-MM-DD)
    #[arg(long = "offset_date", default_value = DEFAULT_OFFSET_DATE)]
    offset_date: String,

    /// Print verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; -v raises the level from WARN to INFO
    let level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("telegram_history={}", level).parse()?),
        )
        .init();

    commands::history::run(HistoryArgs {
        chat_name: cli.chat_name,
        api_id: cli.api_id,
        api_hash: cli.api_hash,
        file: cli.file,
        limit: cli.limit,
        offset_date: cli.offset_date,
    })
    .await?;

    Ok(())
}
