// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Frontdesk attendance engine.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Frontdesk workspace: the policy store
//! seam the attendance resolver reads from, the handler seams the debounce
//! aggregator flushes into, and the shared vocabulary types (conversation
//! keys, attendance modes, message batches).

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FrontdeskError;
pub use types::{
    AdapterType, AttendanceDecision, AttendanceMode, BufferedMessage, ConnectionId,
    ConversationId, ConversationKey, HealthStatus, MessageBatch, MessageContent, MessageId,
    ModeSource, TenantId,
};

// Re-export all adapter traits at crate root.
pub use traits::{DeliveryHandler, FlushHandler, PluginAdapter, PolicyStore};
