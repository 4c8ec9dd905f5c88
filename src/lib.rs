//! Core logic for the target stopwatch widget.
//!
//! Everything in this crate is browser-agnostic except [`now_ms`], which reads
//! `performance.now()` on wasm and a process-relative [`std::time::Instant`]
//! elsewhere. The Yew front end lives in the binary target.

use std::fmt;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

pub mod config;
pub mod ticker;
pub mod timekeeper;
pub mod utils;

pub use config::{NotifyPolicy, StopwatchOptions, TickStrategy};
pub use ticker::TickSlot;
pub use timekeeper::{Notification, Timekeeper};
pub use utils::DurationError;

/// Elapsed time split for display. Minutes are not wrapped into hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub minutes: u64,
    pub seconds: u64,
    pub centiseconds: u64,
}

impl TimeParts {
    pub fn from_ms(ms: u64) -> Self {
        Self {
            minutes: ms / 60_000,
            seconds: (ms % 60_000) / 1_000,
            centiseconds: (ms % 1_000) / 10,
        }
    }
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}.{:02}",
            self.minutes, self.seconds, self.centiseconds
        )
    }
}

/// Format milliseconds as `MM:SS.cc`.
pub fn format_elapsed(ms: u64) -> String {
    TimeParts::from_ms(ms).to_string()
}

/// Monotonic milliseconds since an arbitrary origin.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now);
    now.max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    use once_cell::sync::Lazy;
    static ORIGIN: Lazy<Instant> = Lazy::new(Instant::now);
    ORIGIN.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_boundaries() {
        assert_eq!(format_elapsed(0), "00:00.00");
        assert_eq!(format_elapsed(599_999), "09:59.99");
        assert_eq!(format_elapsed(600_000), "10:00.00");
    }

    #[test]
    fn centiseconds_truncate() {
        assert_eq!(format_elapsed(1_239), "00:01.23");
        assert_eq!(format_elapsed(9), "00:00.00");
    }

    #[test]
    fn minutes_grow_past_two_digits() {
        assert_eq!(format_elapsed(999 * 60_000 + 5_010), "999:05.01");
    }

    #[test]
    fn parts_are_exposed() {
        let parts = TimeParts::from_ms(754_320);
        assert_eq!(
            parts,
            TimeParts {
                minutes: 12,
                seconds: 34,
                centiseconds: 32
            }
        );
    }

    #[test]
    fn now_is_monotonic() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
