// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Effective debounce timing derived from configuration.
//!
//! All configured millisecond durations are clamped into a safe range before
//! they reach the timer primitive. Out-of-range values (zero, negative,
//! absurdly large) are corrected to the nearest bound and the correction is
//! logged — a bad delay setting must never be fatal.

use std::time::Duration;

use tracing::warn;

use frontdesk_config::model::DebounceConfig;

/// Minimum accepted delay. Anything shorter defeats the point of debouncing
/// and risks hot-looping the timer.
pub const MIN_DELAY_MS: i64 = 1_000;

/// Maximum accepted delay. Stays far inside tokio's timer horizon so arming
/// a timer can never panic.
pub const MAX_DELAY_MS: i64 = 10_000_000_000;

/// Effective debounce timing for the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebouncePolicy {
    enabled: bool,
    window: Duration,
    max_wait: Option<Duration>,
}

impl DebouncePolicy {
    /// Build a policy from raw millisecond values, clamping as needed.
    ///
    /// The max-wait ceiling, when present, is additionally raised to at
    /// least the window: a ceiling below the window would force a flush
    /// before the quiet period could ever elapse.
    pub fn new(enabled: bool, window_ms: i64, max_wait_ms: Option<i64>) -> Self {
        let window = clamp_delay_ms("debounce.window_ms", window_ms);
        let max_wait = max_wait_ms.map(|ms| clamp_delay_ms("debounce.max_wait_ms", ms).max(window));
        Self {
            enabled,
            window,
            max_wait,
        }
    }

    /// Build a policy from the configuration section.
    pub fn from_config(config: &DebounceConfig) -> Self {
        Self::new(config.enabled, config.window_ms, config.max_wait_ms)
    }

    /// Whether debouncing is active. When disabled, every message is
    /// dispatched immediately as a single-message batch.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The quiet period after the last message before a flush.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Hard ceiling on buffering time from the first queued message.
    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self::from_config(&DebounceConfig::default())
    }
}

/// Clamp a configured delay into `[MIN_DELAY_MS, MAX_DELAY_MS]`, logging
/// when a correction was applied.
fn clamp_delay_ms(option: &str, configured_ms: i64) -> Duration {
    let effective_ms = configured_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS);
    if effective_ms != configured_ms {
        warn!(
            option,
            configured_ms, effective_ms, "configured delay outside safe range; clamped"
        );
    }
    Duration::from_millis(effective_ms as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    #[test]
    fn in_range_values_pass_through() {
        let policy = DebouncePolicy::new(true, 5_000, Some(20_000));
        assert_eq!(policy.window(), Duration::from_millis(5_000));
        assert_eq!(policy.max_wait(), Some(Duration::from_millis(20_000)));
        assert!(policy.enabled());
    }

    #[test]
    fn negative_window_clamps_to_minimum() {
        let policy = DebouncePolicy::new(true, -5, None);
        assert_eq!(policy.window(), Duration::from_millis(MIN_DELAY_MS as u64));
    }

    #[test]
    fn huge_window_clamps_to_maximum() {
        let policy = DebouncePolicy::new(true, 1_000_000_000_000_000, None);
        assert_eq!(policy.window(), Duration::from_millis(MAX_DELAY_MS as u64));
    }

    #[test]
    fn max_wait_never_below_window() {
        let policy = DebouncePolicy::new(true, 8_000, Some(2_000));
        assert_eq!(policy.max_wait(), Some(Duration::from_millis(8_000)));
    }

    #[test]
    fn absent_max_wait_stays_absent() {
        let policy = DebouncePolicy::new(true, 5_000, None);
        assert!(policy.max_wait().is_none());
    }

    #[traced_test]
    #[test]
    fn clamp_correction_is_logged() {
        let _ = DebouncePolicy::new(true, 0, None);
        assert!(logs_contain("outside safe range"));
        assert!(logs_contain("debounce.window_ms"));
    }

    #[traced_test]
    #[test]
    fn in_range_values_log_nothing() {
        let _ = DebouncePolicy::new(true, 5_000, Some(30_000));
        assert!(!logs_contain("outside safe range"));
    }

    proptest! {
        #[test]
        fn effective_window_always_within_bounds(window_ms in any::<i64>()) {
            let policy = DebouncePolicy::new(true, window_ms, None);
            let ms = policy.window().as_millis() as i64;
            prop_assert!((MIN_DELAY_MS..=MAX_DELAY_MS).contains(&ms));
        }

        #[test]
        fn effective_max_wait_always_within_bounds_and_at_least_window(
            window_ms in any::<i64>(),
            max_wait_ms in any::<i64>(),
        ) {
            let policy = DebouncePolicy::new(true, window_ms, Some(max_wait_ms));
            let max_wait = policy.max_wait().expect("configured ceiling must survive");
            let ms = max_wait.as_millis() as i64;
            prop_assert!((MIN_DELAY_MS..=MAX_DELAY_MS).contains(&ms));
            prop_assert!(max_wait >= policy.window());
        }
    }
}
