// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Policy store trait for attendance policy persistence backends.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{AttendanceMode, ConnectionId, ConversationId, TenantId};

/// Adapter for attendance policy persistence.
///
/// Two record kinds are stored, both scoped per tenant:
///
/// - the **conversation override**: an optional per-conversation mode that,
///   while set, takes precedence over everything else;
/// - the **connection policy**: the channel-wide default mode for one
///   messaging connection.
///
/// Reads return `Ok(None)` when no record exists — absence is how callers
/// fall through to the next precedence level, so it must never surface as an
/// error. `Err` is reserved for the backend actually failing.
#[async_trait]
pub trait PolicyStore: PluginAdapter {
    /// Initializes the backend (migrations, connection setup, etc.).
    async fn initialize(&self) -> Result<(), FrontdeskError>;

    /// Closes the backend, flushing pending writes and releasing connections.
    async fn close(&self) -> Result<(), FrontdeskError>;

    /// Reads the per-conversation override, if one is set.
    async fn get_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
    ) -> Result<Option<AttendanceMode>, FrontdeskError>;

    /// Sets the per-conversation override. Idempotent upsert.
    async fn set_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
        mode: AttendanceMode,
    ) -> Result<(), FrontdeskError>;

    /// Clears the per-conversation override, reverting the conversation to
    /// the connection policy. Idempotent: clearing an absent override succeeds.
    async fn clear_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
    ) -> Result<(), FrontdeskError>;

    /// Reads the connection-wide policy, if one is set.
    async fn get_connection_policy(
        &self,
        tenant: &TenantId,
        connection: &ConnectionId,
    ) -> Result<Option<AttendanceMode>, FrontdeskError>;

    /// Sets the connection-wide policy. Idempotent upsert.
    async fn set_connection_policy(
        &self,
        tenant: &TenantId,
        connection: &ConnectionId,
        mode: AttendanceMode,
    ) -> Result<(), FrontdeskError>;
}
