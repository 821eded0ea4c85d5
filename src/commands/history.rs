//! History command - fetch a chat's message history and save it as JSON

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use grammers_client::types::peer::Peer;
use grammers_client::types::Message;
use tracing::info;

use crate::chat::{chat_title, parse_chat_input, peer_id, resolve_chat, search_dialogs, DialogMatch};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::export;
use crate::record::{sort_chronological, MessageRecord};
use crate::session::{get_client, SessionLock, TelegramClient};

/// Arguments for the history command, mirroring the CLI surface.
#[derive(Debug, Clone)]
pub struct HistoryArgs {
    pub chat_name: String,
    pub api_id: Option<i32>,
    pub api_hash: Option<String>,
    pub file: PathBuf,
    pub limit: usize,
    pub offset_date: String,
}

pub async fn run(args: HistoryArgs) -> Result<()> {
    let mut config = Config::new();
    config.apply_credentials(args.api_id, args.api_hash.as_deref());

    // Fail on bad credentials before anything is written
    config.require_credentials()?;

    let offset_date = parse_offset_date(&args.offset_date)?;

    // Acquire session lock
    let _lock = SessionLock::acquire()?;

    // Connect to Telegram
    let client = get_client(&config).await?;

    // Resolve chat
    let chat = select_chat(&client, &config, &args.chat_name).await?;
    let chat_name = chat_title(&chat);
    let chat_id = peer_id(&chat);
    info!("Selected chat: {}, id: {}", chat_name, chat_id);
    info!("Fetching history from {}", offset_date);

    let records = fetch_history(&client, &chat, &chat_name, chat_id, args.limit, offset_date).await?;
    info!("Finished fetching {} messages", records.len());

    info!("Saving messages to {}", args.file.display());
    export::write_json(&args.file, &records)?;

    println!(
        "Export finished: {} ({} messages)",
        args.file.display(),
        records.len()
    );

    Ok(())
}

/// Parse a `YYYY-MM-DD` date into the start of that day in UTC.
pub fn parse_offset_date(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        Error::InvalidArgument(format!(
            "offset_date '{}' is not a YYYY-MM-DD date: {}",
            raw, e
        ))
    })?;

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::InvalidArgument(format!("offset_date '{}' is out of range", raw)))?;

    Ok(Utc.from_utc_datetime(&midnight))
}

/// Resolve the chat name input to a peer.
///
/// Aliases, numeric IDs and @usernames resolve directly; everything else
/// is matched against dialog titles, with an interactive pick when the
/// input is ambiguous.
async fn select_chat(client: &TelegramClient, config: &Config, chat_name: &str) -> Result<Peer> {
    if let Some((primary, fallback)) = parse_chat_input(chat_name, config) {
        return match resolve_chat(client, &primary).await {
            Ok(chat) => Ok(chat),
            Err(err) => {
                if let Some(fallback) = &fallback {
                    resolve_chat(client, fallback).await
                } else {
                    Err(err)
                }
            }
        };
    }

    let matches = search_dialogs(client, chat_name).await?;
    match matches.len() {
        0 => {
            // Last resort: the input may be a bare username
            if chat_name.contains(char::is_whitespace) {
                return Err(Error::ChatNotFound(format!("Chat '{}' not found", chat_name)));
            }
            client
                .resolve_username(chat_name)
                .await?
                .ok_or_else(|| Error::ChatNotFound(format!("Chat '{}' not found", chat_name)))
        }
        1 => Ok(matches.into_iter().next().map(|m| m.peer).ok_or_else(|| {
            Error::ChatNotFound(format!("Chat '{}' not found", chat_name))
        })?),
        _ => pick_match(matches),
    }
}

/// Interactive disambiguation when several dialog titles match.
fn pick_match(matches: Vec<DialogMatch>) -> Result<Peer> {
    println!("More than one chat found. Please choose the chat to retrieve:");
    for (i, found) in matches.iter().enumerate() {
        let preview = found.last_message.as_deref().unwrap_or("No messages");
        println!("{}. {} - Last message: {}", i + 1, found.title, preview);
    }

    print!("\nEnter the number of the chat: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    select_by_number(matches, input.trim())
}

fn select_by_number(matches: Vec<DialogMatch>, input: &str) -> Result<Peer> {
    let choice: usize = input
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("'{}' is not a number", input)))?;

    if choice == 0 || choice > matches.len() {
        return Err(Error::InvalidArgument(format!(
            "Choice must be between 1 and {}",
            matches.len()
        )));
    }

    Ok(matches
        .into_iter()
        .nth(choice - 1)
        .map(|m| m.peer)
        .ok_or_else(|| Error::InvalidArgument("Choice out of range".to_string()))?)
}

/// Fetch the messages newer than `offset_date` and return the oldest
/// `limit` of them as chronologically ordered records.
async fn fetch_history(
    client: &TelegramClient,
    chat: &Peer,
    chat_name: &str,
    chat_id: i64,
    limit: usize,
    offset_date: DateTime<Utc>,
) -> Result<Vec<MessageRecord>> {
    let mut messages: Vec<Message> = Vec::new();
    let mut iter = client.iter_messages(chat);

    // The iterator yields newest first; stop once messages predate the
    // cutoff. The limit cannot be applied here or it would keep the newest
    // messages instead of the oldest ones since the cutoff.
    while let Some(msg) = iter.next().await.transpose() {
        let msg = msg.map_err(|e| Error::TelegramError(e.to_string()))?;
        if msg.date() < offset_date {
            break;
        }
        messages.push(msg);
    }

    // Reverse for chronological order
    messages.reverse();

    let records: Vec<MessageRecord> = messages
        .iter()
        .map(|msg| MessageRecord::from_message(msg, chat_name, chat_id))
        .collect();

    Ok(finalize_history(records, limit))
}

/// Order records chronologically and keep the oldest `limit` of them.
fn finalize_history(mut records: Vec<MessageRecord>, limit: usize) -> Vec<MessageRecord> {
    sort_chronological(&mut records);
    records.truncate(limit);
    records
}
