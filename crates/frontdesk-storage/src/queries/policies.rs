// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection policy CRUD operations.

use frontdesk_core::{AttendanceMode, ConnectionId, FrontdeskError, TenantId};
use rusqlite::params;

use crate::database::Database;
use crate::queries::parse_mode;

/// Read the channel-wide policy for one connection. `Ok(None)` when no row exists.
pub async fn get_connection_policy(
    db: &Database,
    tenant: &TenantId,
    connection: &ConnectionId,
) -> Result<Option<AttendanceMode>, FrontdeskError> {
    let tenant = tenant.0.clone();
    let connection = connection.0.clone();
    let raw: Option<String> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT mode FROM connection_policies
                 WHERE tenant_id = ?1 AND connection_id = ?2",
            )?;
            let result = stmt.query_row(params![tenant, connection], |row| row.get(0));
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

/// Set (or replace) the channel-wide policy. Idempotent upsert.
pub async fn set_connection_policy(
    db: &Database,
    tenant: &TenantId,
    connection: &ConnectionId,
    mode: AttendanceMode,
) -> Result<(), FrontdeskError> {
    let tenant = tenant.0.clone();
    let connection = connection.0.clone();
    let mode = mode.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO connection_policies (tenant_id, connection_id, mode)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (tenant_id, connection_id)
                 DO UPDATE SET mode = excluded.mode,
                               updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![tenant, connection, mode],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
