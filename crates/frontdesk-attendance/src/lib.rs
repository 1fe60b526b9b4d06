// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attendance mode resolution for the Frontdesk engine.
//!
//! Determines whether an inbound conversation turn is handled by the
//! automated responder or a human operator. Resolution is a strict
//! precedence chain over externally stored policy: per-conversation override
//! first, then the connection-wide policy, then the configured default.

pub mod resolver;

pub use resolver::AttendanceRouter;
