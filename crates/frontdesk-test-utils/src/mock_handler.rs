// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording handlers for deterministic testing.
//!
//! `RecordingFlushHandler` captures batches flushed by the aggregator;
//! `RecordingDeliveryHandler` captures resolved deliveries from the
//! dispatcher. Both have a switchable failure mode for exercising the
//! at-most-once drop path.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use frontdesk_core::traits::handler::{DeliveryHandler, FlushHandler};
use frontdesk_core::{AttendanceDecision, FrontdeskError, MessageBatch};

/// A flush handler that records every batch it receives.
pub struct RecordingFlushHandler {
    batches: Mutex<Vec<MessageBatch>>,
    fail: AtomicBool,
}

impl RecordingFlushHandler {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// Make subsequent `handle_batch` calls fail. The batch is still
    /// recorded so tests can assert it was offered exactly once.
    pub fn fail_next(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// All batches received so far, in order.
    pub async fn batches(&self) -> Vec<MessageBatch> {
        self.batches.lock().await.clone()
    }

    pub async fn batch_count(&self) -> usize {
        self.batches.lock().await.len()
    }
}

impl Default for RecordingFlushHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlushHandler for RecordingFlushHandler {
    async fn handle_batch(&self, batch: MessageBatch) -> Result<(), FrontdeskError> {
        self.batches.lock().await.push(batch);
        if self.fail.load(Ordering::SeqCst) {
            return Err(FrontdeskError::Handler {
                message: "injected handler failure".into(),
                source: None,
            });
        }
        Ok(())
    }
}

/// A delivery handler that records every `(batch, decision)` pair.
pub struct RecordingDeliveryHandler {
    deliveries: Mutex<Vec<(MessageBatch, AttendanceDecision)>>,
    fail: AtomicBool,
}

impl RecordingDeliveryHandler {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail_next(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub async fn deliveries(&self) -> Vec<(MessageBatch, AttendanceDecision)> {
        self.deliveries.lock().await.clone()
    }

    pub async fn delivery_count(&self) -> usize {
        self.deliveries.lock().await.len()
    }
}

impl Default for RecordingDeliveryHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryHandler for RecordingDeliveryHandler {
    async fn deliver(
        &self,
        batch: MessageBatch,
        decision: AttendanceDecision,
    ) -> Result<(), FrontdeskError> {
        self.deliveries.lock().await.push((batch, decision));
        if self.fail.load(Ordering::SeqCst) {
            return Err(FrontdeskError::Handler {
                message: "injected delivery failure".into(),
                source: None,
            });
        }
        Ok(())
    }
}
