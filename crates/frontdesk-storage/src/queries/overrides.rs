// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation override CRUD operations.

use frontdesk_core::{AttendanceMode, ConversationId, FrontdeskError, TenantId};
use rusqlite::params;

use crate::database::Database;
use crate::queries::parse_mode;

/// Read the override for one conversation. `Ok(None)` when no row exists.
pub async fn get_conversation_override(
    db: &Database,
    tenant: &TenantId,
    conversation: &ConversationId,
) -> Result<Option<AttendanceMode>, FrontdeskError> {
    let tenant = tenant.0.clone();
    let conversation = conversation.0.clone();
    let raw: Option<String> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT mode FROM conversation_overrides
                 WHERE tenant_id = ?1 AND conversation_id = ?2",
            )?;
            let result = stmt.query_row(params![tenant, conversation], |row| row.get(0));
            match result {
                Ok(mode) => Ok(Some(mode)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    raw.as_deref().map(parse_mode).transpose()
}

/// Set (or replace) the override for one conversation. Idempotent upsert.
pub async fn set_conversation_override(
    db: &Database,
    tenant: &TenantId,
    conversation: &ConversationId,
    mode: AttendanceMode,
) -> Result<(), FrontdeskError> {
    let tenant = tenant.0.clone();
    let conversation = conversation.0.clone();
    let mode = mode.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversation_overrides (tenant_id, conversation_id, mode)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (tenant_id, conversation_id)
                 DO UPDATE SET mode = excluded.mode,
                               updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![tenant, conversation, mode],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete the override for one conversation. Deleting a missing row succeeds.
pub async fn clear_conversation_override(
    db: &Database,
    tenant: &TenantId,
    conversation: &ConversationId,
) -> Result<(), FrontdeskError> {
    let tenant = tenant.0.clone();
    let conversation = conversation.0.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM conversation_overrides
                 WHERE tenant_id = ?1 AND conversation_id = ?2",
                params![tenant, conversation],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
