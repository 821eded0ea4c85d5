//! List chats command
//!
//! Prints the user's dialogs so chat names and IDs can be discovered
//! before running an export.

use grammers_client::types::peer::Peer;

use crate::chat::{chat_title, peer_id};
use crate::config::Config;
use crate::error::Result;
use crate::session::{get_client, SessionLock};

#[derive(Debug, Clone)]
pub struct ChatInfo {
    pub title: String,
    pub id: i64,
    pub chat_type: String,
}

pub async fn run(limit: usize) -> Result<()> {
    let config = Config::new();

    let _lock = SessionLock::acquire()?;
    let client = get_client(&config).await?;

    let mut chats: Vec<ChatInfo> = Vec::new();
    let mut dialogs = client.iter_dialogs();

    while let Some(dialog) = dialogs.next().await? {
        chats.push(ChatInfo {
            title: chat_title(&dialog.peer),
            id: peer_id(&dialog.peer),
            chat_type: classify_peer(&dialog.peer).to_string(),
        });
        if chats.len() >= limit {
            break;
        }
    }

    print!("{}", render_table(&chats));

    Ok(())
}

fn classify_peer(peer: &Peer) -> &'static str {
    match peer {
        Peer::Channel(_) => "channel",
        Peer::Group(_) => "group",
        Peer::User(_) => "user",
    }
}

/// Render the dialog listing as a text table.
pub fn render_table(chats: &[ChatInfo]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Dialogs: {}\n\n", chats.len()));
    out.push_str(&format!("{:<4} {:<16} {:<9} Title\n", "#", "ID", "Type"));
    out.push_str(&"-".repeat(60));
    out.push('\n');

    for (idx, chat) in chats.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<16} {:<9} {}\n",
            idx + 1,
            chat.id,
            chat.chat_type,
            chat.title
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_table_contains_headers_and_rows() {
        let chats = vec![
            ChatInfo {
                title: "Test Chat".to_string(),
                id: 123,
                chat_type: "group".to_string(),
            },
            ChatInfo {
                title: "News".to_string(),
                id: 456,
                chat_type: "channel".to_string(),
            },
        ];

        let table = render_table(&chats);
        assert!(table.contains("Dialogs: 2"));
        assert!(table.contains("ID"));
        assert!(table.contains("Test Chat"));
        assert!(table.contains("123"));
        assert!(table.contains("channel"));
    }

    #[test]
    fn render_table_empty_list() {
        let table = render_table(&[]);
        assert!(table.contains("Dialogs: 0"));
    }
}
