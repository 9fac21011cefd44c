//! Cancellable timed actions on a session clock.
//!
//! Entries are `{fire_at, action, token}` triples. [`Schedule::pop_due`] hands
//! out due entries one at a time in `(fire_at, insertion)` order, so whatever
//! runs an action can cancel later entries before they are looked at.
use std::time::Duration;

/// Handle used to cancel a scheduled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// What a schedule entry does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimedAction {
    /// One second of countdown.
    Tick,
    /// Show hints on all unfound targets.
    HintPulse,
    /// Hide the hints shown by the last pulse.
    HintPulseEnd,
    /// Hide the end-of-round banner.
    HideMessage,
    /// Leave the finished round.
    EndRound,
}

/// A due entry returned by [`Schedule::pop_due`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub token: TimerToken,
    pub action: TimedAction,
    /// The time the entry was due, which may be earlier than the `now` passed in.
    pub fire_at: Duration,
}

#[derive(Debug, Clone)]
struct Entry {
    fire_at: Duration,
    seq: u64,
    token: TimerToken,
    action: TimedAction,
    repeat: Option<Duration>,
}

/// Smallest interval a repeating entry may use; a zero interval would never
/// let the clock move past it.
pub const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: Vec<Entry>,
    next_token: u64,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once at `fire_at`.
    pub fn once(&mut self, fire_at: Duration, action: TimedAction) -> TimerToken {
        self.insert(fire_at, action, None)
    }

    /// Schedule `action` to fire at `first_at` and then every `interval`.
    pub fn repeating(
        &mut self,
        first_at: Duration,
        interval: Duration,
        action: TimedAction,
    ) -> TimerToken {
        self.insert(first_at, action, Some(interval.max(MIN_REPEAT_INTERVAL)))
    }

    fn insert(
        &mut self,
        fire_at: Duration,
        action: TimedAction,
        repeat: Option<Duration>,
    ) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            fire_at,
            seq,
            token,
            action,
            repeat,
        });
        token
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Remove the entry for `token`. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    /// Earliest pending fire time.
    pub fn next_fire_at(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.fire_at).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take the earliest entry due at or before `now`.
    ///
    /// One-shot entries are removed; repeating entries are moved to their next
    /// occurrence and keep their token, unless that occurrence would overflow
    /// the clock.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.fire_at <= now)
            .min_by_key(|(_, e)| (e.fire_at, e.seq))
            .map(|(i, _)| i)?;

        let fired = {
            let e = &self.entries[index];
            Fired {
                token: e.token,
                action: e.action,
                fire_at: e.fire_at,
            }
        };

        match self.entries[index].repeat {
            Some(interval) => match fired.fire_at.checked_add(interval) {
                Some(next) => {
                    let seq = self.bump_seq();
                    let e = &mut self.entries[index];
                    e.fire_at = next;
                    e.seq = seq;
                }
                // The next occurrence is past the end of the clock.
                None => {
                    self.entries.swap_remove(index);
                }
            },
            None => {
                self.entries.swap_remove(index);
            }
        }

        Some(fired)
    }
}
