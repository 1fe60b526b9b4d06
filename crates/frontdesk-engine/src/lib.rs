// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline wiring and batch dispatch for the Frontdesk attendance engine.
//!
//! Composes the debounce aggregator and the attendance resolver: inbound
//! messages are debounced per conversation, each flushed batch is resolved
//! against the policy store, and the batch is delivered to the automated
//! responder or the human-operator path accordingly.

pub mod dispatcher;
pub mod pipeline;

pub use dispatcher::AttendanceDispatcher;
pub use pipeline::{build_pipeline, Pipeline};
