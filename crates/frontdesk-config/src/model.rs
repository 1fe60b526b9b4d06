// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Frontdesk attendance engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use frontdesk_core::AttendanceMode;
use serde::{Deserialize, Serialize};

/// Top-level Frontdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FrontdeskConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Attendance resolution settings.
    #[serde(default)]
    pub attendance: AttendanceConfig,

    /// Inbound message debounce settings.
    #[serde(default)]
    pub debounce: DebounceConfig,

    /// Policy store backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service instance.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "frontdesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Attendance resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AttendanceConfig {
    /// Fallback mode when neither a conversation override nor a connection
    /// policy exists. Defaults to `human`: the engine fails toward requiring
    /// human attention rather than silently activating automation.
    #[serde(default = "default_mode")]
    pub default_mode: AttendanceMode,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
        }
    }
}

fn default_mode() -> AttendanceMode {
    AttendanceMode::Human
}

/// Inbound message debounce configuration.
///
/// Duration fields are signed on purpose: out-of-range values (including
/// negatives) are clamped into the safe range at use, with a logged warning,
/// rather than rejected at load time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebounceConfig {
    /// Enable debouncing. When false, every inbound message is dispatched
    /// immediately as a single-message batch.
    #[serde(default = "default_debounce_enabled")]
    pub enabled: bool,

    /// Quiet period in milliseconds before a buffered conversation flushes.
    #[serde(default = "default_window_ms")]
    pub window_ms: i64,

    /// Hard ceiling in milliseconds on total buffering time from the first
    /// queued message, bounding latency under continuous arrivals. `None`
    /// disables the ceiling.
    #[serde(default)]
    pub max_wait_ms: Option<i64>,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            enabled: default_debounce_enabled(),
            window_ms: default_window_ms(),
            max_wait_ms: None,
        }
    }
}

fn default_debounce_enabled() -> bool {
    true
}

fn default_window_ms() -> i64 {
    5_000
}

/// Policy store backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("frontdesk").join("frontdesk.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("frontdesk.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}
