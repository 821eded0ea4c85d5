//! Tests for the list_chats command

use telegram_history::commands::list_chats::{render_table, ChatInfo};

fn chat(title: &str, id: i64, chat_type: &str) -> ChatInfo {
    ChatInfo {
        title: title.to_string(),
        id,
        chat_type: chat_type.to_string(),
    }
}

#[test]
fn test_render_table_lists_every_chat() {
    let chats = vec![
        chat("Weekend plans", 111, "group"),
        chat("News feed", 222, "channel"),
        chat("Alice", 333, "user"),
    ];

    let table = render_table(&chats);

    assert!(table.contains("Dialogs: 3"));
    // One numbered row per dialog after the count, blank line, header and rule
    assert_eq!(table.lines().count(), 4 + chats.len());
    assert!(table.contains("Weekend plans"));
    assert!(table.contains("222"));
    assert!(table.contains("user"));
}

#[test]
fn test_render_table_rows_are_numbered_from_one() {
    let chats = vec![chat("Only chat", 1, "user")];
    let table = render_table(&chats);

    let row = table.lines().last().unwrap();
    assert!(row.starts_with("1 "));
    assert!(row.ends_with("Only chat"));
}

#[tokio::test]
#[ignore] // Requires Telegram connection
async fn test_list_chats_fails_without_session() {
    use telegram_history::commands::list_chats;

    let result = list_chats::run(10).await;
    assert!(result.is_err());
}
