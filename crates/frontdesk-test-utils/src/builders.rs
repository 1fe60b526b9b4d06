// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for test fixtures.

use frontdesk_core::{
    BufferedMessage, ConnectionId, ConversationId, ConversationKey, MessageContent, MessageId,
    TenantId,
};

/// Build a conversation key from raw parts.
pub fn make_key(tenant: &str, connection: &str, conversation: &str) -> ConversationKey {
    ConversationKey::new(
        TenantId(tenant.to_string()),
        ConnectionId(connection.to_string()),
        ConversationId(conversation.to_string()),
    )
}

/// Build a text message with a fresh id and the given receive time.
pub fn make_text_message(text: &str, received_at_ms: u64) -> BufferedMessage {
    BufferedMessage {
        id: MessageId(format!("test-{}", uuid::Uuid::new_v4())),
        sender_id: "test-sender".to_string(),
        content: MessageContent::Text(text.to_string()),
        received_at_ms,
        metadata: None,
    }
}
