//! Application-level configuration constants and mount options.

use crate::utils::{validate_target_minutes, DurationError};
use log::warn;
use serde::Deserialize;
use std::fmt;

// Logging
pub const LOG_LEVEL: log::Level = log::Level::Info;

// Ticking
pub const TICK_MS: u32 = 10;
pub const MESSAGE_CLEAR_MS: u32 = 5_000;

// Default values
pub const DEFAULT_TARGET_MINUTES: u32 = 10;

// Min/Max limits for the duration field
pub const MIN_TARGET_MINUTES: u32 = 1;
pub const MAX_TARGET_MINUTES: u32 = 999;

// Host page integration
pub const ROOT_ELEMENT_ID: &str = "stopwatch";
pub const OPTIONS_ATTRIBUTE: &str = "data-options";

/// Short beep played when the target is crossed.
pub const BEEP_DATA_URI: &str = "data:audio/wav;base64,UklGRnoGAABXQVZFZm10IBAAAAABAAEAQB8AAEAfAAABAAgAZGF0YQoGAACBhYqFbF1fdJivrJBhNjVgodDbq2EcBj+a2/LDciUFLIHO8tiJNwgZaLvt559NEAxQp+PwtmMcBjiR1/LMeSwFJHfH8N2QQAoUXrTp66hVFApGn+DyvmwhBTGH0fPTgjMGHm7A7+OZRA0NVqzn77BdGAg+ltvy0H0pBSl+zPLaizsIGGS57OihUhENT6Xh8bllHAU2jdXzxnMoBiJ0xPDcjkAKE1y06u2nVBELRJrb8r1qIAQuhM/z14k5CBZmuuzpm1gRDU+k4fG7aR8GM4rS88h1LAUjdsLx3Y9BCxNctOvurVgSC0OZ2vLBbiMMK4HO8tyJOwgZaLrs6aFTEg1Op+Hxu2oeBjKK0/PJdigFI3fE8d6PQgsUW7Ts7q5aEwtDmNry1oFJDAAAAAA=";

/// When a notification fires relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    /// Fire the first time elapsed reaches the target, then stay quiet until reset.
    #[default]
    Once,
    /// Fire at every whole multiple of the target.
    EveryMultiple,
}

/// How elapsed time advances on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickStrategy {
    /// Recompute from a wall-clock anchor; immune to tick jitter.
    #[default]
    Anchored,
    /// Add `TICK_MS` per tick.
    Accumulative,
}

/// Options read from the host element when the widget mounts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StopwatchOptions {
    pub target_minutes: u32,
    pub notify_policy: NotifyPolicy,
    pub tick_strategy: TickStrategy,
    pub show_duration_field: bool,
}

impl Default for StopwatchOptions {
    fn default() -> Self {
        Self {
            target_minutes: DEFAULT_TARGET_MINUTES,
            notify_policy: NotifyPolicy::default(),
            tick_strategy: TickStrategy::default(),
            show_duration_field: false,
        }
    }
}

#[derive(Debug)]
pub enum OptionsError {
    Json(serde_json::Error),
    Target(DurationError),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::Json(e) => write!(f, "Malformed stopwatch options: {}", e),
            OptionsError::Target(e) => write!(f, "Invalid target in stopwatch options: {}", e),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptionsError::Json(e) => Some(e),
            OptionsError::Target(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for OptionsError {
    fn from(e: serde_json::Error) -> Self {
        OptionsError::Json(e)
    }
}

impl StopwatchOptions {
    /// Parse options from the JSON carried in the host element's attribute.
    pub fn from_json(raw: &str) -> Result<Self, OptionsError> {
        let options: StopwatchOptions = serde_json::from_str(raw)?;
        validate_target_minutes(options.target_minutes).map_err(OptionsError::Target)?;
        Ok(options)
    }

    /// Like [`StopwatchOptions::from_json`], but falls back to defaults.
    /// A missing attribute is not an error.
    pub fn from_attribute(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::default(),
            Some(raw) => Self::from_json(raw).unwrap_or_else(|e| {
                warn!("{}; using defaults", e);
                Self::default()
            }),
        }
    }
}
