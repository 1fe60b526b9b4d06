// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Frontdesk engine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a tenant (an isolated customer organization).
///
/// All policy data is scoped per tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

/// Unique identifier for a messaging connection (one channel account under a tenant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub String);

/// Unique identifier for a conversation thread under a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

/// Unique identifier for a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Composite key identifying one conversation across the engine.
///
/// Deterministically derived from tenant + connection + conversation so that
/// concurrent messages for the same chat always collide on the same key.
/// This is the buffer key for debouncing and the scope for all ordering
/// guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    pub tenant_id: TenantId,
    pub connection_id: ConnectionId,
    pub conversation_id: ConversationId,
}

impl ConversationKey {
    /// Build a key from its three parts.
    ///
    /// Empty id segments indicate a caller bug (every inbound message carries
    /// all three identifiers) and are rejected in debug builds.
    pub fn new(
        tenant_id: TenantId,
        connection_id: ConnectionId,
        conversation_id: ConversationId,
    ) -> Self {
        debug_assert!(!tenant_id.0.is_empty(), "tenant id must not be empty");
        debug_assert!(!connection_id.0.is_empty(), "connection id must not be empty");
        debug_assert!(
            !conversation_id.0.is_empty(),
            "conversation id must not be empty"
        );
        Self {
            tenant_id,
            connection_id,
            conversation_id,
        }
    }
}

impl std::fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.tenant_id.0, self.connection_id.0, self.conversation_id.0
        )
    }
}

/// Who handles a conversation turn: the automated responder or a human operator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceMode {
    Ai,
    Human,
}

/// Which precedence level produced an attendance decision.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ModeSource {
    /// A per-conversation override was set.
    Conversation,
    /// The connection-wide policy applied.
    Global,
    /// Neither level had a value; the configured fallback was used.
    Default,
}

/// The result of one attendance resolution.
///
/// Transient: recomputed on every resolution call and never persisted, so
/// policy changes take effect on the next message. `source == Conversation`
/// implies `conversation_id` is set and an override row existed; `source ==
/// Default` implies neither level had a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceDecision {
    pub mode: AttendanceMode,
    pub source: ModeSource,
    pub tenant_id: TenantId,
    pub connection_id: ConnectionId,
    pub conversation_id: Option<ConversationId>,
}

/// Payload of one inbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageContent {
    /// Plain text.
    Text(String),
    /// Non-text payload (media reference, location, ...) passed through untouched.
    Structured(serde_json::Value),
}

/// One inbound message queued for aggregation.
///
/// Owned exclusively by the aggregator's per-key buffer while queued; at
/// flush time ownership transfers to the downstream handler inside a
/// [`MessageBatch`]. `received_at_ms` must be monotonically non-decreasing
/// within a key; it is carried for ordering context only, FIFO arrival order
/// is what determines batch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferedMessage {
    pub id: MessageId,
    pub sender_id: String,
    pub content: MessageContent,
    pub received_at_ms: u64,
    /// Opaque passthrough metadata (JSON), e.g. message type or reply target.
    pub metadata: Option<String>,
}

/// An ordered batch of buffered messages for one conversation, produced by a flush.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBatch {
    pub key: ConversationKey,
    /// Messages in arrival order.
    pub messages: Vec<BufferedMessage>,
}

impl MessageBatch {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Receive time of the oldest message in the batch.
    pub fn first_received_at_ms(&self) -> Option<u64> {
        self.messages.first().map(|m| m.received_at_ms)
    }

    /// Concatenate the text content of the batch in arrival order, one
    /// message per line. Non-text messages are skipped.
    pub fn combined_text(&self) -> String {
        self.messages
            .iter()
            .filter_map(|m| match &m.content {
                MessageContent::Text(text) => Some(text.as_str()),
                MessageContent::Structured(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter in the plugin registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Store,
    Handler,
}
