// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch dispatch: resolve the attendance mode, route to the matching handler.
//!
//! The dispatcher sits between the aggregator and the two delivery paths.
//! Every flushed batch is resolved fresh against the policy store, then
//! handed to the AI-facing or human-facing handler with the decision
//! attached. Delivery failures propagate to the aggregator, which logs and
//! drops — at-most-once end to end.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use frontdesk_attendance::AttendanceRouter;
use frontdesk_core::{
    AttendanceMode, DeliveryHandler, FlushHandler, FrontdeskError, MessageBatch,
};

/// Routes flushed batches to the automated responder or the human queue.
pub struct AttendanceDispatcher {
    router: Arc<AttendanceRouter>,
    ai: Arc<dyn DeliveryHandler>,
    human: Arc<dyn DeliveryHandler>,
}

impl AttendanceDispatcher {
    pub fn new(
        router: Arc<AttendanceRouter>,
        ai: Arc<dyn DeliveryHandler>,
        human: Arc<dyn DeliveryHandler>,
    ) -> Self {
        Self { router, ai, human }
    }
}

#[async_trait]
impl FlushHandler for AttendanceDispatcher {
    async fn handle_batch(&self, batch: MessageBatch) -> Result<(), FrontdeskError> {
        let decision = self.router.resolve_key(&batch.key).await;

        info!(
            key = %batch.key,
            mode = %decision.mode,
            source = %decision.source,
            messages = batch.len(),
            "dispatching batch"
        );

        let handler = match decision.mode {
            AttendanceMode::Ai => &self.ai,
            AttendanceMode::Human => &self.human,
        };
        handler.deliver(batch, decision).await
    }
}
