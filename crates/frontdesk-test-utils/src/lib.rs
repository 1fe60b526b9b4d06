// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Frontdesk integration tests.
//!
//! Provides mock adapters and fixture builders for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockPolicyStore`] - In-memory policy store with fault injection
//! - [`RecordingFlushHandler`] / [`RecordingDeliveryHandler`] - Capture
//!   flushed batches and resolved deliveries for assertion

pub mod builders;
pub mod mock_handler;
pub mod mock_store;

pub use builders::{make_key, make_text_message};
pub use mock_handler::{RecordingDeliveryHandler, RecordingFlushHandler};
pub use mock_store::MockPolicyStore;
