// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock policy store for deterministic testing.
//!
//! `MockPolicyStore` implements `PolicyStore` over in-memory maps, with
//! switchable fault injection so tests can exercise the fail-toward-human
//! path without a real backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use frontdesk_core::traits::adapter::PluginAdapter;
use frontdesk_core::traits::store::PolicyStore;
use frontdesk_core::{
    AdapterType, AttendanceMode, ConnectionId, ConversationId, FrontdeskError, HealthStatus,
    TenantId,
};

/// An in-memory policy store for testing.
///
/// Overrides and policies are keyed by `(tenant, id)`. When `fail_reads` or
/// `fail_writes` is switched on, the corresponding operations return a
/// `Store` error instead of touching the maps, simulating a backend outage.
pub struct MockPolicyStore {
    overrides: Mutex<HashMap<(String, String), AttendanceMode>>,
    policies: Mutex<HashMap<(String, String), AttendanceMode>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_count: AtomicUsize,
}

impl MockPolicyStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self {
            overrides: Mutex::new(HashMap::new()),
            policies: Mutex::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            read_count: AtomicUsize::new(0),
        }
    }

    /// Seed a connection policy, builder-style.
    pub async fn with_connection_policy(
        self,
        tenant: &str,
        connection: &str,
        mode: AttendanceMode,
    ) -> Self {
        self.policies
            .lock()
            .await
            .insert((tenant.to_string(), connection.to_string()), mode);
        self
    }

    /// Seed a conversation override, builder-style.
    pub async fn with_conversation_override(
        self,
        tenant: &str,
        conversation: &str,
        mode: AttendanceMode,
    ) -> Self {
        self.overrides
            .lock()
            .await
            .insert((tenant.to_string(), conversation.to_string()), mode);
        self
    }

    /// Make all read operations fail with a `Store` error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make all write operations fail with a `Store` error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of read operations attempted (including failed ones).
    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), FrontdeskError> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(FrontdeskError::Store {
                source: "injected read fault".into(),
            });
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), FrontdeskError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FrontdeskError::Store {
                source: "injected write fault".into(),
            });
        }
        Ok(())
    }
}

impl Default for MockPolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockPolicyStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("injected fault".into()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }
}

#[async_trait]
impl PolicyStore for MockPolicyStore {
    async fn initialize(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), FrontdeskError> {
        Ok(())
    }

    async fn get_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
    ) -> Result<Option<AttendanceMode>, FrontdeskError> {
        self.check_read()?;
        Ok(self
            .overrides
            .lock()
            .await
            .get(&(tenant.0.clone(), conversation.0.clone()))
            .copied())
    }

    async fn set_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
        mode: AttendanceMode,
    ) -> Result<(), FrontdeskError> {
        self.check_write()?;
        self.overrides
            .lock()
            .await
            .insert((tenant.0.clone(), conversation.0.clone()), mode);
        Ok(())
    }

    async fn clear_conversation_override(
        &self,
        tenant: &TenantId,
        conversation: &ConversationId,
    ) -> Result<(), FrontdeskError> {
        self.check_write()?;
        self.overrides
            .lock()
            .await
            .remove(&(tenant.0.clone(), conversation.0.clone()));
        Ok(())
    }

    async fn get_connection_policy(
        &self,
        tenant: &TenantId,
        connection: &ConnectionId,
    ) -> Result<Option<AttendanceMode>, FrontdeskError> {
        self.check_read()?;
        Ok(self
            .policies
            .lock()
            .await
            .get(&(tenant.0.clone(), connection.0.clone()))
            .copied())
    }

    async fn set_connection_policy(
        &self,
        tenant: &TenantId,
        connection: &ConnectionId,
        mode: AttendanceMode,
    ) -> Result<(), FrontdeskError> {
        self.check_write()?;
        self.policies
            .lock()
            .await
            .insert((tenant.0.clone(), connection.0.clone()), mode);
        Ok(())
    }
}
