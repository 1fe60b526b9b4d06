// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline wiring: configuration in, ready-to-feed aggregator out.

use std::sync::Arc;

use tracing::info;

use frontdesk_attendance::AttendanceRouter;
use frontdesk_config::FrontdeskConfig;
use frontdesk_core::{DeliveryHandler, PolicyStore};
use frontdesk_debounce::{DebouncePolicy, MessageAggregator};

use crate::dispatcher::AttendanceDispatcher;

/// A fully wired inbound pipeline.
///
/// The inbound message source feeds [`Pipeline::aggregator`]; flushed
/// batches flow through the dispatcher to the delivery handlers. The router
/// is exposed separately for administrative mutations (override set/clear,
/// policy set).
pub struct Pipeline {
    pub aggregator: Arc<MessageAggregator>,
    pub router: Arc<AttendanceRouter>,
}

/// Wire aggregator, resolver, and dispatcher from a loaded configuration.
pub fn build_pipeline(
    config: &FrontdeskConfig,
    store: Arc<dyn PolicyStore>,
    ai: Arc<dyn DeliveryHandler>,
    human: Arc<dyn DeliveryHandler>,
) -> Pipeline {
    let policy = DebouncePolicy::from_config(&config.debounce);
    let router = Arc::new(AttendanceRouter::from_config(store, &config.attendance));
    let dispatcher = Arc::new(AttendanceDispatcher::new(Arc::clone(&router), ai, human));
    let aggregator = Arc::new(MessageAggregator::new(policy, dispatcher));

    info!(
        debounce_enabled = config.debounce.enabled,
        window_ms = config.debounce.window_ms,
        max_wait_ms = ?config.debounce.max_wait_ms,
        default_mode = %config.attendance.default_mode,
        "pipeline wired"
    );

    Pipeline { aggregator, router }
}
