// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the PolicyStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use frontdesk_config::model::StorageConfig;
use frontdesk_core::{
    AdapterType, AttendanceMode, ConnectionId, ConversationId, FrontdeskError, HealthStatus,
    PluginAdapter, PolicyStore, TenantId,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed policy store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call to
/// [`PolicyStore::initialize`].
pub struct SqlitePolicyStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqlitePolicyStore {
    /// Create a new SqlitePolicyStore with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, FrontdeskError> {
        self.db.get().ok_or_else(|| FrontdeskError::Store {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqlitePolicyStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl PolicyStore for SqlitePolicyStore {
    async fn initialize(&self) -> Result<(), FrontdeskError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| FrontdeskError::Store {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite policy store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), FrontdeskError> {
        self.db()?.close().await
    }

    async fn get_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
    ) -> Result<Option<AttendanceMode>, FrontdeskError> {
        queries::overrides::get_conversation_override(self.db()?, tenant, conversation).await
    }

    async fn set_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
        mode: AttendanceMode,
    ) -> Result<(), FrontdeskError> {
        queries::overrides::set_conversation_override(self.db()?, tenant, conversation, mode).await
    }

    async fn clear_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
    ) -> Result<(), FrontdeskError> {
        queries::overrides::clear_conversation_override(self.db()?, tenant, conversation).await
    }

    async fn get_connection_policy(
        &self,
        tenant: &TenantId,
        connection: &ConnectionId,
    ) -> Result<Option<AttendanceMode>, FrontdeskError> {
        queries::policies::get_connection_policy(self.db()?, tenant, connection).await
    }

    async fn set_connection_policy(
        &self,
        tenant: &TenantId,
        connection: &ConnectionId,
        mode: AttendanceMode,
    ) -> Result<(), FrontdeskError> {
        queries::policies::set_connection_policy(self.db()?, tenant, connection, mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn ids() -> (TenantId, ConnectionId, ConversationId) {
        (
            TenantId("t1".into()),
            ConnectionId("c1".into()),
            ConversationId("v1".into()),
        )
    }

    #[tokio::test]
    async fn sqlite_store_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let store = SqlitePolicyStore::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
        assert_eq!(store.adapter_type(), AdapterType::Store);
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let store = SqlitePolicyStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqlitePolicyStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        let result = store.initialize().await;
        assert!(result.is_err(), "second initialize should fail");
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let store = SqlitePolicyStore::new(make_config(db_path.to_str().unwrap()));

        let result = store.health_check().await;
        assert!(result.is_err(), "health_check should fail before initialize");
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let store = SqlitePolicyStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        let status = store.health_check().await.unwrap();
        assert_eq!(status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn full_policy_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let store = SqlitePolicyStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        let (tenant, connection, conversation) = ids();

        // No records yet.
        assert!(store
            .get_connection_policy(&tenant, &connection)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .get_conversation_override(&tenant, &conversation)
            .await
            .unwrap()
            .is_none());

        // Set the connection policy and a conversation override.
        store
            .set_connection_policy(&tenant, &connection, AttendanceMode::Ai)
            .await
            .unwrap();
        store
            .set_conversation_override(&tenant, &conversation, AttendanceMode::Human)
            .await
            .unwrap();

        assert_eq!(
            store
                .get_connection_policy(&tenant, &connection)
                .await
                .unwrap(),
            Some(AttendanceMode::Ai)
        );
        assert_eq!(
            store
                .get_conversation_override(&tenant, &conversation)
                .await
                .unwrap(),
            Some(AttendanceMode::Human)
        );

        // Clear the override; the policy remains.
        store
            .clear_conversation_override(&tenant, &conversation)
            .await
            .unwrap();
        assert!(store
            .get_conversation_override(&tenant, &conversation)
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            store
                .get_connection_policy(&tenant, &connection)
                .await
                .unwrap(),
            Some(AttendanceMode::Ai)
        );

        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_runs_checkpoint() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("shutdown.db");
        let store = SqlitePolicyStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        let (tenant, connection, _) = ids();
        store
            .set_connection_policy(&tenant, &connection, AttendanceMode::Ai)
            .await
            .unwrap();

        store.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("persist.db");
        let (tenant, connection, _) = ids();

        {
            let store = SqlitePolicyStore::new(make_config(db_path.to_str().unwrap()));
            store.initialize().await.unwrap();
            store
                .set_connection_policy(&tenant, &connection, AttendanceMode::Ai)
                .await
                .unwrap();
            store.close().await.unwrap();
        }

        let store = SqlitePolicyStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();
        assert_eq!(
            store
                .get_connection_policy(&tenant, &connection)
                .await
                .unwrap(),
            Some(AttendanceMode::Ai)
        );
        store.close().await.unwrap();
    }
}
