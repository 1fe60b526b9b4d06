// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules for the policy tables.

pub mod overrides;
pub mod policies;

use std::str::FromStr;

use frontdesk_core::{AttendanceMode, FrontdeskError};

/// Parse a stored mode column value.
///
/// An unrecognized value means the row was written outside this crate's
/// contract; it surfaces as a store fault (which resolution treats as
/// absence), never as a panic.
pub(crate) fn parse_mode(raw: &str) -> Result<AttendanceMode, FrontdeskError> {
    AttendanceMode::from_str(raw).map_err(|_| FrontdeskError::Store {
        source: format!("unrecognized attendance mode `{raw}` in store").into(),
    })
}
