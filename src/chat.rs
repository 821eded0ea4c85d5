//! Chat operations and entity resolution

use grammers_client::types::peer::Peer;
use grammers_client::Client;

use crate::config::{ChatEntity, Config};
use crate::error::{Error, Result};

/// A dialog whose title matched the user's chat name input.
#[derive(Debug, Clone)]
pub struct DialogMatch {
    pub peer: Peer,
    pub title: String,
    pub last_message: Option<String>,
}

/// Resolve a ChatEntity to an actual Peer
pub async fn resolve_chat(client: &Client, entity: &ChatEntity) -> Result<Peer> {
    match entity {
        ChatEntity::Channel(target_id) => {
            // Channels are resolved by ID, which requires the channel
            // to be present in the user's dialogs
            let mut dialogs = client.iter_dialogs();

            while let Some(dialog) = dialogs.next().await? {
                if let Peer::Channel(channel) = &dialog.peer {
                    if channel.raw.id == *target_id {
                        return Ok(Peer::Channel(channel.clone()));
                    }
                }
            }

            Err(Error::ChatNotFound(format!(
                "Channel {} not found in dialogs",
                target_id
            )))
        }
        ChatEntity::Chat(target_id) => {
            let mut dialogs = client.iter_dialogs();

            while let Some(dialog) = dialogs.next().await? {
                if let Peer::Group(group) = &dialog.peer {
                    if group_id(&group.raw) == *target_id {
                        return Ok(Peer::Group(group.clone()));
                    }
                }
            }

            Err(Error::ChatNotFound(format!(
                "Chat {} not found in dialogs",
                target_id
            )))
        }
        ChatEntity::Username(username) => client
            .resolve_username(username)
            .await?
            .ok_or_else(|| Error::ChatNotFound(format!("Username @{} not found", username))),
        ChatEntity::UserId(target_id) => {
            let mut dialogs = client.iter_dialogs();

            while let Some(dialog) = dialogs.next().await? {
                if let Peer::User(user) = &dialog.peer {
                    if user.raw.id() == *target_id {
                        return Ok(Peer::User(user.clone()));
                    }
                }
            }

            Err(Error::ChatNotFound(format!(
                "User {} not found in dialogs",
                target_id
            )))
        }
    }
}

/// Get the display title for a peer
pub fn chat_title(peer: &Peer) -> String {
    match peer {
        Peer::Channel(c) => c.title().to_string(),
        Peer::Group(g) => g.title().unwrap_or("Group").to_string(),
        Peer::User(u) => u.full_name(),
    }
}

/// Get the numeric ID for a peer
pub fn peer_id(peer: &Peer) -> i64 {
    match peer {
        Peer::Channel(c) => c.raw.id,
        Peer::Group(g) => group_id(&g.raw),
        Peer::User(u) => u.raw.id(),
    }
}

// Groups can be backed by any raw Chat variant (megagroups are channels)
fn group_id(raw: &grammers_tl_types::enums::Chat) -> i64 {
    match raw {
        grammers_tl_types::enums::Chat::Empty(c) => c.id,
        grammers_tl_types::enums::Chat::Chat(c) => c.id,
        grammers_tl_types::enums::Chat::Forbidden(c) => c.id,
        grammers_tl_types::enums::Chat::Channel(c) => c.id,
        grammers_tl_types::enums::Chat::ChannelForbidden(c) => c.id,
    }
}

/// Resolve chat input into a ChatEntity and optional fallback.
/// - Config alias wins
/// - Numeric strings are treated as channel IDs with group fallback
/// - `@username` is treated as a username
/// - Anything else is `None`: the caller should search dialog titles
pub fn parse_chat_input(
    chat_input: &str,
    config: &Config,
) -> Option<(ChatEntity, Option<ChatEntity>)> {
    if let Some(entity) = config.get_chat(chat_input) {
        return Some((entity.clone(), None));
    }

    if let Ok(id) = chat_input.parse::<i64>() {
        return Some((ChatEntity::Channel(id), Some(ChatEntity::Chat(id))));
    }

    if chat_input.starts_with('@') {
        return Some((ChatEntity::username(chat_input), None));
    }

    None
}

/// Search the user's dialogs for titles containing `needle` (case-insensitive).
///
/// Matches carry a short preview of the last message so an interactive
/// caller can disambiguate between several hits.
pub async fn search_dialogs(client: &Client, needle: &str) -> Result<Vec<DialogMatch>> {
    let needle_lower = needle.to_lowercase();
    let mut matches = Vec::new();
    let mut dialogs = client.iter_dialogs();

    while let Some(dialog) = dialogs.next().await? {
        let title = chat_title(&dialog.peer);
        if !title.to_lowercase().contains(&needle_lower) {
            continue;
        }

        let last_message = dialog
            .last_message
            .as_ref()
            .map(|msg| message_preview(msg.text()));

        matches.push(DialogMatch {
            peer: dialog.peer.clone(),
            title,
            last_message,
        });
    }

    Ok(matches)
}

/// Truncate a message body to a one-line preview.
pub fn message_preview(text: &str) -> String {
    let line = text.replace('\n', " ");
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return "No messages".to_string();
    }
    trimmed.chars().take(20).collect()
}
