//! Elapsed-time tracking and target-crossing detection.
//!
//! [`Timekeeper`] is a plain value: the caller owns the tick source and hands
//! in the current time (milliseconds from any monotonic origin) on every
//! call that needs it. Nothing here touches the browser, which keeps the
//! whole state machine testable with a virtual clock.
//!
//! # States
//! - `Idle`: not running, elapsed frozen, no anchor.
//! - `Running`: elapsed advances on [`Timekeeper::tick`].
//!
//! [`Timekeeper::reset`] returns to a zeroed `Idle` from either state.

use crate::config::{NotifyPolicy, StopwatchOptions, TickStrategy, DEFAULT_TARGET_MINUTES, TICK_MS};
use crate::utils::{parse_target_minutes, validate_target_minutes, DurationError};
use log::{debug, info};

pub const MS_PER_MINUTE: u64 = 60_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    pub elapsed_ms: u64,
    pub running: bool,
    /// Wall-clock anchor, only set while running under [`TickStrategy::Anchored`].
    pub start_instant: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetConfig {
    pub target_minutes: u32,
}

impl TargetConfig {
    pub fn target_ms(&self) -> u64 {
        u64::from(self.target_minutes) * MS_PER_MINUTE
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            target_minutes: DEFAULT_TARGET_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    /// Target multiples already signaled (repeating policy).
    pub last_notified_multiple: u64,
    /// Single-shot guard.
    pub notified_once: bool,
    pub message_visible: bool,
    /// Bumped on every fire and every reset; a deferred clear only applies
    /// to the generation it was scheduled for.
    pub message_generation: u64,
}

/// Raised by [`Timekeeper::tick`] when the target (or a multiple of it) is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// Which multiple of the target was reached; always 1 under [`NotifyPolicy::Once`].
    pub multiple: u64,
    pub elapsed_ms: u64,
    /// Target in force when this fired.
    pub target_minutes: u32,
    /// Pass back to [`Timekeeper::clear_message`] when the banner times out.
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timekeeper {
    timer: TimerState,
    target: TargetConfig,
    notification: NotificationState,
    policy: NotifyPolicy,
    strategy: TickStrategy,
}

impl Default for Timekeeper {
    fn default() -> Self {
        Self::new(NotifyPolicy::default(), TickStrategy::default())
    }
}

impl Timekeeper {
    pub fn new(policy: NotifyPolicy, strategy: TickStrategy) -> Self {
        Self {
            timer: TimerState::default(),
            target: TargetConfig::default(),
            notification: NotificationState::default(),
            policy,
            strategy,
        }
    }

    /// Build from mount options, rejecting an out-of-range target.
    pub fn from_options(options: &StopwatchOptions) -> Result<Self, DurationError> {
        let mut tk = Self::new(options.notify_policy, options.tick_strategy);
        tk.target.target_minutes = validate_target_minutes(options.target_minutes)?;
        Ok(tk)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.timer.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.timer.running
    }

    pub fn target_minutes(&self) -> u32 {
        self.target.target_minutes
    }

    pub fn target_ms(&self) -> u64 {
        self.target.target_ms()
    }

    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    pub fn strategy(&self) -> TickStrategy {
        self.strategy
    }

    pub fn timer_state(&self) -> &TimerState {
        &self.timer
    }

    pub fn notification_state(&self) -> &NotificationState {
        &self.notification
    }

    pub fn last_notified_multiple(&self) -> u64 {
        self.notification.last_notified_multiple
    }

    pub fn message_visible(&self) -> bool {
        self.notification.message_visible
    }

    /// Whether elapsed time has reached the configured target.
    pub fn at_target(&self) -> bool {
        self.timer.elapsed_ms >= self.target_ms()
    }

    /// Idle -> Running. No-op when already running.
    pub fn start(&mut self, now_ms: u64) {
        if self.timer.running {
            return;
        }
        self.timer.running = true;
        if self.strategy == TickStrategy::Anchored {
            self.timer.start_instant = Some(now_ms.saturating_sub(self.timer.elapsed_ms));
        }
        info!("Stopwatch started at {} ms elapsed", self.timer.elapsed_ms);
    }

    /// Running -> Idle, freezing elapsed at its last computed value.
    pub fn pause(&mut self) {
        if !self.timer.running {
            return;
        }
        self.timer.running = false;
        self.timer.start_instant = None;
        info!("Stopwatch paused at {} ms elapsed", self.timer.elapsed_ms);
    }

    /// Flip between running and paused. Returns the new running flag.
    pub fn toggle(&mut self, now_ms: u64) -> bool {
        if self.timer.running {
            self.pause();
        } else {
            self.start(now_ms);
        }
        self.timer.running
    }

    /// Advance elapsed time and check the target.
    ///
    /// Ticks delivered while idle are ignored. At most one [`Notification`]
    /// is returned per tick, however many multiples were crossed since the
    /// previous one.
    pub fn tick(&mut self, now_ms: u64) -> Option<Notification> {
        if !self.timer.running {
            return None;
        }

        let next = match (self.strategy, self.timer.start_instant) {
            (TickStrategy::Anchored, Some(anchor)) => now_ms.saturating_sub(anchor),
            (TickStrategy::Anchored, None) => {
                // No anchor yet: take one now and hold the current value.
                self.timer.start_instant = Some(now_ms.saturating_sub(self.timer.elapsed_ms));
                self.timer.elapsed_ms
            }
            (TickStrategy::Accumulative, _) => self.timer.elapsed_ms + u64::from(TICK_MS),
        };
        // Elapsed never moves backwards, even if the clock does.
        self.timer.elapsed_ms = self.timer.elapsed_ms.max(next);

        let fired = self.check_threshold().map(|n| {
            self.notification.message_generation += 1;
            self.notification.message_visible = true;
            Notification {
                generation: self.notification.message_generation,
                ..n
            }
        });
        if let Some(n) = fired {
            info!(
                "Target of {} min reached (multiple {}) at {} ms",
                self.target.target_minutes, n.multiple, n.elapsed_ms
            );
        }
        fired
    }

    fn check_threshold(&mut self) -> Option<Notification> {
        let elapsed = self.timer.elapsed_ms;
        let target = self.target_ms();
        match self.policy {
            NotifyPolicy::Once => {
                if self.notification.notified_once || elapsed < target {
                    return None;
                }
                self.notification.notified_once = true;
                Some(Notification {
                    multiple: 1,
                    elapsed_ms: elapsed,
                    target_minutes: self.target.target_minutes,
                    generation: 0,
                })
            }
            NotifyPolicy::EveryMultiple => {
                let current = elapsed / target;
                if current == 0 || current <= self.notification.last_notified_multiple {
                    return None;
                }
                self.notification.last_notified_multiple = current;
                Some(Notification {
                    multiple: current,
                    elapsed_ms: elapsed,
                    target_minutes: self.target.target_minutes,
                    generation: 0,
                })
            }
        }
    }

    /// Zero everything except the target.
    pub fn reset(&mut self) {
        self.timer = TimerState::default();
        self.notification = NotificationState {
            message_generation: self.notification.message_generation + 1,
            ..NotificationState::default()
        };
        info!("Stopwatch reset (target {} min)", self.target.target_minutes);
    }

    pub fn message_generation(&self) -> u64 {
        self.notification.message_generation
    }

    /// Hide the transient "target reached" message scheduled for `generation`.
    /// Returns false, leaving the banner alone, when a later fire or a reset
    /// has superseded it.
    pub fn clear_message(&mut self, generation: u64) -> bool {
        if generation != self.notification.message_generation {
            debug!(
                "Ignoring stale message clear (generation {} < {})",
                generation, self.notification.message_generation
            );
            return false;
        }
        self.notification.message_visible = false;
        true
    }

    /// Apply a validated target, recomputing notification progress so that
    /// multiples already passed are not signaled again.
    ///
    /// Under [`NotifyPolicy::Once`] a target lowered below elapsed before the
    /// first fire still fires on the next tick.
    pub fn set_target_minutes(&mut self, minutes: u32) -> Result<(), DurationError> {
        let minutes = validate_target_minutes(minutes)?;
        self.target.target_minutes = minutes;

        let elapsed = self.timer.elapsed_ms;
        let target = self.target_ms();
        self.notification.last_notified_multiple = elapsed / target;
        if elapsed < target {
            self.notification.notified_once = false;
        }
        debug!(
            "Target set to {} min; last notified multiple now {}",
            minutes, self.notification.last_notified_multiple
        );
        Ok(())
    }

    /// Parse raw field text and apply it. On error the previous target is kept.
    pub fn set_target_from_input(&mut self, input: &str) -> Result<u32, DurationError> {
        let minutes = parse_target_minutes(input)?;
        self.set_target_minutes(minutes)?;
        Ok(minutes)
    }
}
