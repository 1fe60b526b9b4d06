// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite policy store for the Frontdesk attendance engine.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed CRUD
//! operations for conversation overrides and connection policies.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqlitePolicyStore;
pub use database::Database;
