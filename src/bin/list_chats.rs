//! List chats binary.

use std::env;
use telegram_history::commands::list_chats;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args: Vec<String> = env::args().collect();
    let limit = match args.get(1) {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("Usage: list_chats [limit]"))?,
        None => 50,
    };
    list_chats::run(limit).await?;
    Ok(())
}
