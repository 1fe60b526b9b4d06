// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attendance mode resolution with precedence-ordered policy lookup.
//!
//! Decides who handles a conversation turn: conversation override >
//! connection policy > configured default. The resolver never fails toward
//! automation — a store fault at any level reads as "no value here" and
//! resolution continues down the chain, bottoming out at the configured
//! default (`human` unless overridden).

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use frontdesk_config::model::AttendanceConfig;
use frontdesk_core::{
    AttendanceDecision, AttendanceMode, ConnectionId, ConversationId, ConversationKey,
    ModeSource, PolicyStore, TenantId,
};

/// Resolves the attendance mode for inbound conversation turns.
///
/// Stateless per call: every resolution re-reads the store, so policy
/// changes take effect on the next message without any cache invalidation.
pub struct AttendanceRouter {
    store: Arc<dyn PolicyStore>,
    default_mode: AttendanceMode,
}

impl AttendanceRouter {
    /// Create a new router over the given policy store.
    pub fn new(store: Arc<dyn PolicyStore>, default_mode: AttendanceMode) -> Self {
        Self {
            store,
            default_mode,
        }
    }

    /// Create a router using the configured fallback mode.
    pub fn from_config(store: Arc<dyn PolicyStore>, config: &AttendanceConfig) -> Self {
        Self::new(store, config.default_mode)
    }

    /// Resolve the attendance mode for one conversation turn.
    ///
    /// Precedence order (short-circuiting):
    /// 1. Per-conversation override, when a conversation id is supplied
    /// 2. Connection-wide policy
    /// 3. Configured default
    ///
    /// Infallible by design: "record absent" and "store errored" both fall
    /// through to the next level — the only difference is that faults are
    /// logged. Blocking message handling on a transient store fault is worse
    /// than defaulting to human attendance.
    pub async fn resolve(
        &self,
        tenant: &TenantId,
        connection: &ConnectionId,
        conversation: Option<&ConversationId>,
    ) -> AttendanceDecision {
        if let Some(conversation) = conversation {
            match self
                .store
                .get_conversation_override(tenant, conversation)
                .await
            {
                Ok(Some(mode)) => {
                    return self.decision(
                        mode,
                        ModeSource::Conversation,
                        tenant,
                        connection,
                        Some(conversation),
                    );
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(
                        tenant = %tenant.0,
                        conversation = %conversation.0,
                        %error,
                        "conversation override lookup failed; falling through"
                    );
                }
            }
        }

        match self.store.get_connection_policy(tenant, connection).await {
            Ok(Some(mode)) => {
                return self.decision(mode, ModeSource::Global, tenant, connection, conversation);
            }
            Ok(None) => {}
            Err(error) => {
                warn!(
                    tenant = %tenant.0,
                    connection = %connection.0,
                    %error,
                    "connection policy lookup failed; falling through"
                );
            }
        }

        self.decision(
            self.default_mode,
            ModeSource::Default,
            tenant,
            connection,
            conversation,
        )
    }

    /// Resolve for a full conversation key. Convenience for batch dispatch.
    pub async fn resolve_key(&self, key: &ConversationKey) -> AttendanceDecision {
        self.resolve(
            &key.tenant_id,
            &key.connection_id,
            Some(&key.conversation_id),
        )
        .await
    }

    /// Set the per-conversation override. Administrative path, not the hot
    /// path: store errors are logged and reported as `false`, never raised.
    pub async fn set_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
        mode: AttendanceMode,
    ) -> bool {
        match self
            .store
            .set_conversation_override(tenant, conversation, mode)
            .await
        {
            Ok(()) => {
                info!(
                    tenant = %tenant.0,
                    conversation = %conversation.0,
                    %mode,
                    "conversation override set"
                );
                true
            }
            Err(error) => {
                error!(
                    tenant = %tenant.0,
                    conversation = %conversation.0,
                    %mode,
                    %error,
                    "failed to set conversation override"
                );
                false
            }
        }
    }

    /// Clear the per-conversation override, reverting the conversation to
    /// the connection policy on its next resolution. Idempotent.
    pub async fn clear_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
    ) -> bool {
        match self
            .store
            .clear_conversation_override(tenant, conversation)
            .await
        {
            Ok(()) => {
                info!(
                    tenant = %tenant.0,
                    conversation = %conversation.0,
                    "conversation override cleared"
                );
                true
            }
            Err(error) => {
                error!(
                    tenant = %tenant.0,
                    conversation = %conversation.0,
                    %error,
                    "failed to clear conversation override"
                );
                false
            }
        }
    }

    /// Set the connection-wide policy. Idempotent upsert.
    pub async fn set_connection_policy(
        &self,
        tenant: &TenantId,
        connection: &ConnectionId,
        mode: AttendanceMode,
    ) -> bool {
        match self
            .store
            .set_connection_policy(tenant, connection, mode)
            .await
        {
            Ok(()) => {
                info!(
                    tenant = %tenant.0,
                    connection = %connection.0,
                    %mode,
                    "connection policy set"
                );
                true
            }
            Err(error) => {
                error!(
                    tenant = %tenant.0,
                    connection = %connection.0,
                    %mode,
                    %error,
                    "failed to set connection policy"
                );
                false
            }
        }
    }

    fn decision(
        &self,
        mode: AttendanceMode,
        source: ModeSource,
        tenant: &TenantId,
        connection: &ConnectionId,
        conversation: Option<&ConversationId>,
    ) -> AttendanceDecision {
        debug!(
            tenant = %tenant.0,
            connection = %connection.0,
            %mode,
            %source,
            "attendance mode resolved"
        );
        AttendanceDecision {
            mode,
            source,
            tenant_id: tenant.clone(),
            connection_id: connection.clone(),
            conversation_id: conversation.cloned(),
        }
    }
}
