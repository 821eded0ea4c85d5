//! Message records retrieved from a chat
//!
//! A record is created by the fetch loop, held in memory for the run,
//! serialized once into the output file and then discarded.

use grammers_client::types::peer::Peer;
use grammers_client::types::Message;
use serde::{Deserialize, Serialize};

/// Timestamp format used in the output file
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One retrieved message, as it appears in the JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub message_id: i32,
    pub chat_name: String,
    pub chat_id: i64,
    pub date: String,
    pub message_type: String,
    pub sender_type: String,
    pub sender_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_username: Option<String>,
    pub sender_id: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_msg_id: Option<i32>,
    /// Audio transcription hook. Always `None`: transcription requires a
    /// premium RPC that is not wired up yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
}

impl MessageRecord {
    /// Build a record from a fetched message.
    pub fn from_message(msg: &Message, chat_name: &str, chat_id: i64) -> Self {
        let (sender_type, sender_name, sender_username, sender_id) = describe_sender(msg);

        Self {
            message_id: msg.id(),
            chat_name: chat_name.to_string(),
            chat_id,
            date: msg.date().format(DATE_FORMAT).to_string(),
            message_type: if msg.media().is_some() {
                "media".to_string()
            } else {
                "text".to_string()
            },
            sender_type,
            sender_name,
            sender_username,
            sender_id,
            message: msg.text().to_string(),
            reply_to_msg_id: msg.reply_to_message_id(),
            transcription: None,
        }
    }
}

fn describe_sender(msg: &Message) -> (String, String, Option<String>, i64) {
    match msg.sender() {
        Some(Peer::User(user)) => {
            let name = user.full_name();
            let name = if name.is_empty() {
                user.username()
                    .map(|u| format!("@{}", u))
                    .unwrap_or_else(|| "Unknown".to_string())
            } else {
                name
            };
            (
                "user".to_string(),
                name,
                user.username().map(|u| u.to_string()),
                user.raw.id(),
            )
        }
        Some(Peer::Group(group)) => {
            let id = match &group.raw {
                grammers_tl_types::enums::Chat::Empty(c) => c.id,
                grammers_tl_types::enums::Chat::Chat(c) => c.id,
                grammers_tl_types::enums::Chat::Forbidden(c) => c.id,
                grammers_tl_types::enums::Chat::Channel(c) => c.id,
                grammers_tl_types::enums::Chat::ChannelForbidden(c) => c.id,
            };
            (
                "group".to_string(),
                group.title().unwrap_or("Group").to_string(),
                None,
                id,
            )
        }
        Some(Peer::Channel(channel)) => (
            "channel".to_string(),
            channel.title().to_string(),
            None,
            channel.raw.id,
        ),
        None => ("unknown".to_string(), "Unknown".to_string(), None, 0),
    }
}

/// Sort records chronologically, oldest first.
///
/// The date string format sorts lexicographically in time order; the
/// message ID breaks ties between messages in the same second.
pub fn sort_chronological(records: &mut [MessageRecord]) {
    records.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.message_id.cmp(&b.message_id))
    });
}
