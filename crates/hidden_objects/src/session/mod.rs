//! Round lifetime: discovery tracking, countdown, hint pulses and end of round.
//!
//! A [`SessionController`] is driven by discrete events (ticks, clicks, and
//! [`SessionController::advance`] for scheduled actions). Every event runs to
//! completion before the next one, so no locking is involved.
use std::time::Duration;

pub mod commands;
pub mod controller;
pub mod schedule;

pub use commands::{CommandSink, FnSink, MultiSink, SessionCommand, SessionCommandKind, VecSink};
pub use controller::SessionController;
pub use schedule::{Schedule, TimedAction, TimerToken};

pub const ALL_FOUND_MESSAGE: &str = "You found them all!";
pub const TIME_UP_MESSAGE: &str = "Time's up!";

/// States of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Built but not started.
    Initializing,
    /// Countdown running; clicks count.
    Active,
    /// Every target was found; waiting for the end delay.
    AllFound,
    /// The countdown ran out; waiting for the end delay.
    TimedOut,
    /// Finished or torn down. Nothing has effect any more.
    Ended,
}

impl SessionState {
    pub fn is_active(self) -> bool {
        self == SessionState::Active
    }

    /// True once the round has a result (or was torn down).
    pub fn is_over(self) -> bool {
        matches!(
            self,
            SessionState::AllFound | SessionState::TimedOut | SessionState::Ended
        )
    }
}

/// How a round finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    AllFound,
    TimedOut,
}

/// Timing constants of a round.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTiming {
    /// Countdown step.
    pub tick_interval: Duration,
    /// Time between hint pulses.
    pub hint_interval: Duration,
    /// How long a hint pulse stays visible.
    pub hint_duration: Duration,
    /// How long the end banner stays visible.
    pub message_duration: Duration,
    /// Delay between the round result and leaving the round.
    pub end_delay: Duration,
    /// Remaining seconds at or below which every tick flashes a warning.
    pub low_time_threshold: u32,
    /// Whether the controller schedules its own ticks. Hosts that deliver
    /// ticks themselves turn this off and call `on_tick`.
    pub self_ticking: bool,
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            hint_interval: Duration::from_secs(5),
            hint_duration: Duration::from_millis(400),
            message_duration: Duration::from_secs(2),
            end_delay: Duration::from_millis(2500),
            low_time_threshold: 10,
            self_ticking: true,
        }
    }
}

impl RoundTiming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hint_interval(mut self, interval: Duration) -> Self {
        self.hint_interval = interval;
        self
    }

    pub fn with_hint_duration(mut self, duration: Duration) -> Self {
        self.hint_duration = duration;
        self
    }

    pub fn with_message_duration(mut self, duration: Duration) -> Self {
        self.message_duration = duration;
        self
    }

    pub fn with_end_delay(mut self, delay: Duration) -> Self {
        self.end_delay = delay;
        self
    }

    pub fn with_low_time_threshold(mut self, seconds: u32) -> Self {
        self.low_time_threshold = seconds;
        self
    }

    /// Ticks come from the host via `on_tick` instead of the schedule.
    pub fn with_external_ticks(mut self) -> Self {
        self.self_ticking = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_matches_game_feel() {
        let t = RoundTiming::default();
        assert_eq!(t.tick_interval, Duration::from_secs(1));
        assert_eq!(t.hint_interval, Duration::from_secs(5));
        assert_eq!(t.hint_duration, Duration::from_millis(400));
        assert_eq!(t.end_delay, Duration::from_millis(2500));
        assert_eq!(t.low_time_threshold, 10);
        assert!(t.self_ticking);
        assert!(!t.with_external_ticks().self_ticking);
    }

    #[test]
    fn state_predicates() {
        assert!(SessionState::Active.is_active());
        assert!(!SessionState::Initializing.is_over());
        assert!(SessionState::AllFound.is_over());
        assert!(SessionState::TimedOut.is_over());
        assert!(SessionState::Ended.is_over());
    }
}
