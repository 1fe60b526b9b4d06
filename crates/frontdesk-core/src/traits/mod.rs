// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Frontdesk plugin architecture.
//!
//! Stateful adapters (the policy store) extend the [`PluginAdapter`] base
//! trait; the handler seams are plain callback traits. All use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod handler;
pub mod store;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use handler::{DeliveryHandler, FlushHandler};
pub use store::PolicyStore;
