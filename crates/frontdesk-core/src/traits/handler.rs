// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handler traits for batch handoff seams.

use async_trait::async_trait;

use crate::error::FrontdeskError;
use crate::types::{AttendanceDecision, MessageBatch};

/// Receives a flushed batch from the aggregator.
///
/// Delivery is at-most-once: if `handle_batch` fails, the caller logs the
/// failure and drops the batch rather than re-queueing it — chat messages
/// are not safely replayable without user awareness. Implementations must
/// tolerate that contract.
#[async_trait]
pub trait FlushHandler: Send + Sync + 'static {
    async fn handle_batch(&self, batch: MessageBatch) -> Result<(), FrontdeskError>;
}

/// Final delivery seam for a resolved batch.
///
/// Implemented outside this workspace by the automated responder and the
/// human-operator notification path. The decision carries which precedence
/// level selected the mode, for downstream observability.
#[async_trait]
pub trait DeliveryHandler: Send + Sync + 'static {
    async fn deliver(
        &self,
        batch: MessageBatch,
        decision: AttendanceDecision,
    ) -> Result<(), FrontdeskError>;
}
