//! The round state machine.
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::scene::{ObjectId, Scene};
use crate::session::commands::{CommandSink, SessionCommand, SessionCommandKind};
use crate::session::schedule::{Schedule, TimedAction, TimerToken};
use crate::session::{
    RoundOutcome, RoundTiming, SessionState, ALL_FOUND_MESSAGE, TIME_UP_MESSAGE,
};
use crate::theme::ThemeConfig;

/// Owns one round from `start` to `Ended`.
///
/// `Initializing -> Active -> {AllFound | TimedOut} -> Ended`. Only `Active`
/// reacts to ticks and clicks. Leaving `Active` cancels the countdown and the
/// hint pulse; `teardown` cancels everything.
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    scene: Scene,
    timing: RoundTiming,
    time_left: u32,
    found_count: usize,
    total_targets: usize,
    schedule: Schedule,
    now: Duration,
    tick_timer: Option<TimerToken>,
    hint_timer: Option<TimerToken>,
    hint_hide_timer: Option<TimerToken>,
    outcome: Option<RoundOutcome>,
}

impl SessionController {
    /// Create a controller for `scene` using the theme's time limit.
    pub fn new(theme: &ThemeConfig, scene: Scene) -> Self {
        Self::for_scene(theme.time_limit, scene)
    }

    /// Create a controller for `scene` with an explicit time limit in seconds.
    pub fn for_scene(time_limit: u32, scene: Scene) -> Self {
        let total_targets = scene.total_targets();
        Self {
            state: SessionState::Initializing,
            scene,
            timing: RoundTiming::default(),
            time_left: time_limit,
            found_count: 0,
            total_targets,
            schedule: Schedule::new(),
            now: Duration::ZERO,
            tick_timer: None,
            hint_timer: None,
            hint_hide_timer: None,
            outcome: None,
        }
    }

    /// Replace the timing constants. Only meaningful before `start`.
    pub fn with_timing(mut self, timing: RoundTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn found_count(&self) -> usize {
        self.found_count
    }

    pub fn total_targets(&self) -> usize {
        self.total_targets
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn timing(&self) -> &RoundTiming {
        &self.timing
    }

    /// Session clock: total time passed to `advance`.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Number of scheduled actions still pending.
    pub fn pending_timers(&self) -> usize {
        self.schedule.len()
    }

    /// Whether a hint pulse is currently visible.
    pub fn hint_visible(&self) -> bool {
        self.hint_hide_timer.is_some()
    }

    /// Enter `Active`: publish the initial HUD state and schedule the countdown
    /// and hint pulses. Does nothing unless the controller is `Initializing`.
    pub fn start(&mut self, sink: &mut dyn CommandSink) {
        if self.state != SessionState::Initializing {
            debug!("start() ignored in state {:?}.", self.state);
            return;
        }

        self.state = SessionState::Active;
        info!(
            "Round started: {} targets, {}s on the clock.",
            self.total_targets, self.time_left
        );
        send(sink, SessionCommand::TimeChanged { time_left: self.time_left });
        send(
            sink,
            SessionCommand::ProgressChanged {
                found: self.found_count,
                total: self.total_targets,
            },
        );

        if self.total_targets == 0 {
            warn!("Scene has no targets; the round is won immediately.");
            self.finish(RoundOutcome::AllFound, sink);
            return;
        }
        if self.time_left == 0 {
            self.finish(RoundOutcome::TimedOut, sink);
            return;
        }

        if self.timing.self_ticking {
            let interval = self.timing.tick_interval;
            self.tick_timer = Some(self.schedule.repeating(
                self.now.saturating_add(interval),
                interval,
                TimedAction::Tick,
            ));
        }
        let interval = self.timing.hint_interval;
        self.hint_timer = Some(self.schedule.repeating(
            self.now.saturating_add(interval),
            interval,
            TimedAction::HintPulse,
        ));
    }

    /// Move the session clock forward by `dt`, firing every action that falls due.
    pub fn advance(&mut self, dt: Duration, sink: &mut dyn CommandSink) {
        let target = self.now.saturating_add(dt);
        while let Some(fired) = self.schedule.pop_due(target) {
            self.now = fired.fire_at;
            self.fire(fired.action, sink);
        }
        self.now = target;
    }

    /// One second of countdown.
    pub fn on_tick(&mut self, sink: &mut dyn CommandSink) {
        if !self.state.is_active() || self.time_left == 0 {
            return;
        }

        self.time_left -= 1;
        send(sink, SessionCommand::TimeChanged { time_left: self.time_left });

        if self.time_left == 0 {
            self.finish(RoundOutcome::TimedOut, sink);
        } else if self.time_left <= self.timing.low_time_threshold {
            send(sink, SessionCommand::FlashWarning);
        }
    }

    /// The player clicked target `id`.
    pub fn on_target_clicked(&mut self, id: ObjectId, sink: &mut dyn CommandSink) {
        if !self.state.is_active() {
            debug!("Click on {id} ignored in state {:?}.", self.state);
            return;
        }
        if !self.scene.mark_found(id) {
            debug!("Click on {id} ignored: not an unfound target.");
            return;
        }

        self.found_count += 1;
        send(sink, SessionCommand::MarkFound(id));
        if self.hint_visible() {
            send(sink, SessionCommand::HideHint(id));
        }
        send(
            sink,
            SessionCommand::ProgressChanged {
                found: self.found_count,
                total: self.total_targets,
            },
        );

        if self.found_count == self.total_targets {
            self.finish(RoundOutcome::AllFound, sink);
        }
    }

    /// The player clicked decoy `id`. Cosmetic only.
    pub fn on_decoy_clicked(&mut self, id: ObjectId, sink: &mut dyn CommandSink) {
        if !self.state.is_active() {
            return;
        }
        match self.scene.get(id) {
            Some(obj) if !obj.is_target => send(sink, SessionCommand::DecoyFeedback(id)),
            _ => debug!("Decoy click on {id} ignored: not a decoy."),
        }
    }

    /// The player clicked object `id`, whatever it is.
    pub fn on_object_clicked(&mut self, id: ObjectId, sink: &mut dyn CommandSink) {
        match self.scene.get(id).map(|o| o.is_target) {
            Some(true) => self.on_target_clicked(id, sink),
            Some(false) => self.on_decoy_clicked(id, sink),
            None => debug!("Click on unknown object {id} ignored."),
        }
    }

    /// Abandon the round: cancel every pending action and move to `Ended`
    /// without emitting anything.
    pub fn teardown(&mut self) {
        if self.state != SessionState::Ended {
            debug!(
                "Tearing down round in state {:?} with {} pending timers.",
                self.state,
                self.schedule.len()
            );
        }
        self.schedule.cancel_all();
        self.tick_timer = None;
        self.hint_timer = None;
        self.hint_hide_timer = None;
        self.state = SessionState::Ended;
    }

    fn fire(&mut self, action: TimedAction, sink: &mut dyn CommandSink) {
        match action {
            TimedAction::Tick => self.on_tick(sink),
            TimedAction::HintPulse => self.hint_pulse(sink),
            TimedAction::HintPulseEnd => {
                self.hint_hide_timer = None;
                self.hide_all_hints(sink);
            }
            TimedAction::HideMessage => send(sink, SessionCommand::HideMessage),
            TimedAction::EndRound => {
                self.schedule.cancel_all();
                self.state = SessionState::Ended;
                info!("Round ended with {:?}.", self.outcome);
                send(sink, SessionCommand::TransitionToMenu);
            }
        }
    }

    fn hint_pulse(&mut self, sink: &mut dyn CommandSink) {
        if !self.state.is_active() {
            return;
        }
        if sink.wants(SessionCommandKind::ShowHint) {
            for target in self.scene.unfound_targets() {
                sink.send(SessionCommand::ShowHint(target.id));
            }
        }
        if let Some(previous) = self.hint_hide_timer.take() {
            self.schedule.cancel(previous);
        }
        let hide_at = self.now.saturating_add(self.timing.hint_duration);
        self.hint_hide_timer = Some(self.schedule.once(hide_at, TimedAction::HintPulseEnd));
    }

    fn hide_all_hints(&self, sink: &mut dyn CommandSink) {
        if sink.wants(SessionCommandKind::HideHint) {
            for target in self.scene.targets() {
                sink.send(SessionCommand::HideHint(target.id));
            }
        }
    }

    fn finish(&mut self, outcome: RoundOutcome, sink: &mut dyn CommandSink) {
        for token in [self.tick_timer.take(), self.hint_timer.take()]
            .into_iter()
            .flatten()
        {
            self.schedule.cancel(token);
        }
        if let Some(token) = self.hint_hide_timer.take() {
            self.schedule.cancel(token);
            self.hide_all_hints(sink);
        }

        let (state, message) = match outcome {
            RoundOutcome::AllFound => (SessionState::AllFound, ALL_FOUND_MESSAGE),
            RoundOutcome::TimedOut => (SessionState::TimedOut, TIME_UP_MESSAGE),
        };
        self.state = state;
        self.outcome = Some(outcome);
        info!(
            "Round over ({:?}): {}/{} found, {}s left.",
            outcome, self.found_count, self.total_targets, self.time_left
        );

        send(sink, SessionCommand::ShowEndMessage(message.to_owned()));
        let hide_at = self.now.saturating_add(self.timing.message_duration);
        let end_at = self.now.saturating_add(self.timing.end_delay);
        self.schedule.once(hide_at, TimedAction::HideMessage);
        self.schedule.once(end_at, TimedAction::EndRound);
    }
}

#[inline]
fn send(sink: &mut dyn CommandSink, command: SessionCommand) {
    if sink.wants(command.kind()) {
        sink.send(command);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::scene::compose;
    use crate::session::commands::VecSink;
    use crate::theme::{Color, ObjectSpec, Shape};

    fn theme(targets: usize, time_limit: u32) -> ThemeConfig {
        ThemeConfig::new("test", "Test")
            .with_target_range(targets, targets)
            .with_time_limit(time_limit)
            .with_objects([
                ObjectSpec::decor("rock", "Rock", Shape::Circle { diameter: 10.0 }, Color(1)),
                ObjectSpec::target("gem", "Gem", Shape::Triangle { size: 8.0 }, Color(2)),
            ])
    }

    fn controller(targets: usize, time_limit: u32) -> SessionController {
        let theme = theme(targets, time_limit);
        let points: Vec<Vec2> = (0..10).map(|i| Vec2::new(i as f32 * 60.0, 0.0)).collect();
        let scene = compose(&theme, &points, &mut StdRng::seed_from_u64(1)).unwrap();
        SessionController::new(&theme, scene)
    }

    fn started(targets: usize, time_limit: u32) -> (SessionController, VecSink) {
        let mut c = controller(targets, time_limit);
        let mut sink = VecSink::new();
        c.start(&mut sink);
        sink.clear();
        (c, sink)
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn start_publishes_hud_and_activates() {
        let mut c = controller(3, 90);
        let mut sink = VecSink::new();
        assert_eq!(c.state(), SessionState::Initializing);

        c.start(&mut sink);
        assert_eq!(c.state(), SessionState::Active);
        assert_eq!(
            sink.as_slice(),
            &[
                SessionCommand::TimeChanged { time_left: 90 },
                SessionCommand::ProgressChanged { found: 0, total: 3 },
            ]
        );
        assert_eq!(c.pending_timers(), 2);

        sink.clear();
        c.start(&mut sink);
        assert!(sink.is_empty(), "second start is ignored");
    }

    #[test]
    fn clicks_before_start_are_ignored() {
        let mut c = controller(3, 90);
        let mut sink = VecSink::new();
        c.on_target_clicked(ObjectId(0), &mut sink);
        c.on_tick(&mut sink);
        assert_eq!(c.found_count(), 0);
        assert_eq!(c.time_left(), 90);
        assert!(sink.is_empty());
    }

    #[test]
    fn ninetieth_tick_times_out() {
        let (mut c, mut sink) = started(3, 90);
        for _ in 0..89 {
            c.on_tick(&mut sink);
        }
        assert_eq!(c.state(), SessionState::Active);
        assert_eq!(c.time_left(), 1);

        c.on_tick(&mut sink);
        assert_eq!(c.state(), SessionState::TimedOut);
        assert_eq!(c.time_left(), 0);
        assert_eq!(c.outcome(), Some(RoundOutcome::TimedOut));

        c.on_tick(&mut sink);
        assert_eq!(c.time_left(), 0, "time never goes negative");
        assert_eq!(sink.count(SessionCommandKind::ShowEndMessage), 1);
    }

    #[test]
    fn low_time_flashes_for_last_ten_seconds_only() {
        let (mut c, mut sink) = started(3, 30);
        for _ in 0..30 {
            c.on_tick(&mut sink);
        }
        // time_left 10..=1 flash; 0 times out instead.
        assert_eq!(sink.count(SessionCommandKind::FlashWarning), 10);
        assert_eq!(sink.count(SessionCommandKind::TimeChanged), 30);
    }

    #[test]
    fn self_ticking_times_out_after_limit() {
        let (mut c, mut sink) = started(2, 5);
        c.advance(ms(4999), &mut sink);
        assert_eq!(c.state(), SessionState::Active);
        assert_eq!(c.time_left(), 1);

        c.advance(ms(1), &mut sink);
        assert_eq!(c.state(), SessionState::TimedOut);
        assert_eq!(
            sink.as_slice().last(),
            Some(&SessionCommand::ShowEndMessage(TIME_UP_MESSAGE.into()))
        );
    }

    #[test]
    fn external_ticks_are_not_duplicated() {
        let theme = theme(2, 20);
        let scene = compose(&theme, &[Vec2::ZERO, Vec2::X * 100.0], &mut StdRng::seed_from_u64(0))
            .unwrap();
        let mut c = SessionController::new(&theme, scene)
            .with_timing(RoundTiming::default().with_external_ticks());
        let mut sink = VecSink::new();
        c.start(&mut sink);
        c.advance(secs(10), &mut sink);
        assert_eq!(c.time_left(), 20);
        c.on_tick(&mut sink);
        assert_eq!(c.time_left(), 19);
    }

    #[test]
    fn duplicate_click_counts_once() {
        let (mut c, mut sink) = started(3, 90);
        c.on_target_clicked(ObjectId(0), &mut sink);
        c.on_target_clicked(ObjectId(0), &mut sink);
        assert_eq!(c.found_count(), 1);
        assert_eq!(sink.count(SessionCommandKind::MarkFound), 1);
    }

    #[test]
    fn third_distinct_target_wins() {
        let (mut c, mut sink) = started(3, 90);
        c.on_target_clicked(ObjectId(0), &mut sink);
        c.on_target_clicked(ObjectId(1), &mut sink);
        assert_eq!(c.state(), SessionState::Active);

        c.on_target_clicked(ObjectId(2), &mut sink);
        assert_eq!(c.state(), SessionState::AllFound);
        assert_eq!(c.found_count(), 3);
        assert_eq!(sink.count(SessionCommandKind::ShowEndMessage), 1);
        assert!(sink
            .as_slice()
            .contains(&SessionCommand::ShowEndMessage(ALL_FOUND_MESSAGE.into())));
    }

    #[test]
    fn decoy_clicks_only_give_feedback() {
        let (mut c, mut sink) = started(3, 90);
        let decoy = c.scene().decoys()[0].id;

        c.on_decoy_clicked(decoy, &mut sink);
        c.on_target_clicked(decoy, &mut sink);
        c.on_decoy_clicked(ObjectId(0), &mut sink);
        assert_eq!(sink.as_slice(), &[SessionCommand::DecoyFeedback(decoy)]);
        assert_eq!(c.found_count(), 0);
    }

    #[test]
    fn object_click_dispatches_by_role() {
        let (mut c, mut sink) = started(3, 90);
        let decoy = c.scene().decoys()[0].id;
        c.on_object_clicked(decoy, &mut sink);
        c.on_object_clicked(ObjectId(1), &mut sink);
        c.on_object_clicked(ObjectId(999), &mut sink);

        assert_eq!(sink.count(SessionCommandKind::DecoyFeedback), 1);
        assert_eq!(sink.count(SessionCommandKind::MarkFound), 1);
        assert_eq!(c.found_count(), 1);
    }

    #[test]
    fn hint_pulse_shows_unfound_then_hides_all() {
        let (mut c, mut sink) = started(3, 90);
        c.on_target_clicked(ObjectId(1), &mut sink);
        sink.clear();

        c.advance(secs(5), &mut sink);
        let shown: Vec<_> = sink
            .as_slice()
            .iter()
            .filter(|cmd| cmd.kind() == SessionCommandKind::ShowHint)
            .cloned()
            .collect();
        assert_eq!(
            shown,
            vec![
                SessionCommand::ShowHint(ObjectId(0)),
                SessionCommand::ShowHint(ObjectId(2)),
            ]
        );
        assert!(c.hint_visible());
        assert_eq!(sink.count(SessionCommandKind::HideHint), 0);

        c.advance(ms(399), &mut sink);
        assert_eq!(sink.count(SessionCommandKind::HideHint), 0);
        c.advance(ms(1), &mut sink);
        assert_eq!(sink.count(SessionCommandKind::HideHint), 3);
        assert!(!c.hint_visible());

        sink.clear();
        c.advance(ms(4600), &mut sink);
        assert_eq!(sink.count(SessionCommandKind::ShowHint), 2);
    }

    #[test]
    fn finding_during_pulse_hides_that_hint() {
        let (mut c, mut sink) = started(3, 90);
        c.advance(ms(5100), &mut sink);
        sink.clear();

        c.on_target_clicked(ObjectId(2), &mut sink);
        assert_eq!(
            &sink.as_slice()[..2],
            &[
                SessionCommand::MarkFound(ObjectId(2)),
                SessionCommand::HideHint(ObjectId(2)),
            ]
        );
    }

    #[test]
    fn no_pulse_fires_after_round_is_won() {
        let (mut c, mut sink) = started(3, 90);
        c.advance(ms(5200), &mut sink);
        assert!(c.hint_visible());
        for id in 0..3 {
            c.on_target_clicked(ObjectId(id), &mut sink);
        }
        assert_eq!(c.state(), SessionState::AllFound);
        assert!(!c.hint_visible());
        // The visible pulse is closed as part of the transition.
        assert_eq!(sink.count(SessionCommandKind::HideHint), 3 + 3);

        sink.clear();
        c.advance(secs(2), &mut sink);
        assert_eq!(sink.as_slice(), &[SessionCommand::HideMessage]);
        assert_eq!(c.state(), SessionState::AllFound);

        sink.clear();
        c.advance(ms(500), &mut sink);
        assert_eq!(sink.as_slice(), &[SessionCommand::TransitionToMenu]);
        assert_eq!(c.state(), SessionState::Ended);
        assert_eq!(c.pending_timers(), 0);

        sink.clear();
        let decoy = c.scene().decoys()[0].id;
        c.advance(secs(60), &mut sink);
        c.on_tick(&mut sink);
        c.on_target_clicked(ObjectId(0), &mut sink);
        c.on_decoy_clicked(decoy, &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn teardown_cancels_pending_end() {
        let (mut c, mut sink) = started(3, 90);
        for id in 0..3 {
            c.on_target_clicked(ObjectId(id), &mut sink);
        }
        assert_eq!(c.pending_timers(), 2);

        c.teardown();
        assert_eq!(c.state(), SessionState::Ended);
        assert_eq!(c.pending_timers(), 0);

        sink.clear();
        c.advance(secs(10), &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn teardown_while_active_stops_countdown() {
        let (mut c, mut sink) = started(3, 90);
        c.advance(secs(3), &mut sink);
        c.teardown();
        sink.clear();
        c.advance(secs(30), &mut sink);
        assert_eq!(c.time_left(), 87);
        assert!(sink.is_empty());
    }

    #[test]
    fn advancing_to_the_end_of_time_finishes_the_round() {
        let (mut c, mut sink) = started(3, 5);
        c.advance(secs(1), &mut sink);
        c.advance(Duration::MAX, &mut sink);

        assert_eq!(c.now(), Duration::MAX);
        assert_eq!(c.outcome(), Some(RoundOutcome::TimedOut));
        assert_eq!(c.state(), SessionState::Ended);
        assert_eq!(sink.count(SessionCommandKind::TransitionToMenu), 1);

        c.advance(Duration::MAX, &mut sink);
        assert_eq!(c.now(), Duration::MAX);
    }

    #[test]
    fn scene_without_targets_is_won_at_start() {
        let theme = theme(2, 90);
        let scene = compose(&theme, &[], &mut StdRng::seed_from_u64(0)).unwrap();
        let mut c = SessionController::new(&theme, scene);
        let mut sink = VecSink::new();
        c.start(&mut sink);

        assert_eq!(c.state(), SessionState::AllFound);
        assert_eq!(c.pending_timers(), 2);
        c.advance(ms(2500), &mut sink);
        assert_eq!(c.state(), SessionState::Ended);
    }

    #[test]
    fn timeout_during_pulse_closes_hints_and_never_pulses_again() {
        let (mut c, mut sink) = started(3, 5);
        c.advance(secs(5), &mut sink);
        assert_eq!(c.state(), SessionState::TimedOut);
        // The pulse due at 5s runs before the final tick; the timeout closes it.
        assert_eq!(sink.count(SessionCommandKind::ShowHint), 3);
        assert_eq!(sink.count(SessionCommandKind::HideHint), 3);
        assert!(!c.hint_visible());

        sink.clear();
        c.advance(secs(30), &mut sink);
        assert_eq!(sink.count(SessionCommandKind::ShowHint), 0);
        assert_eq!(sink.count(SessionCommandKind::HideHint), 0);
        assert_eq!(sink.count(SessionCommandKind::TransitionToMenu), 1);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Click(u32),
        Tick,
        Advance(u64),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0u32..12).prop_map(Step::Click),
            Just(Step::Tick),
            (0u64..3000).prop_map(Step::Advance),
        ]
    }

    proptest! {
        #[test]
        fn discovery_and_terminal_transitions_are_well_behaved(
            steps in proptest::collection::vec(step(), 0..200),
        ) {
            let (mut c, mut sink) = started(3, 20);
            let mut last_found = 0;

            for s in steps {
                match s {
                    Step::Click(id) => c.on_object_clicked(ObjectId(id), &mut sink),
                    Step::Tick => c.on_tick(&mut sink),
                    Step::Advance(v) => c.advance(ms(v), &mut sink),
                }
                prop_assert!(c.found_count() >= last_found);
                prop_assert!(c.found_count() <= c.total_targets());
                prop_assert_eq!(c.found_count(), c.scene().found_count());
                last_found = c.found_count();
            }

            let ends = sink.count(SessionCommandKind::ShowEndMessage);
            prop_assert!(ends <= 1);
            prop_assert_eq!(ends == 1, c.state().is_over());
            prop_assert!(sink.count(SessionCommandKind::TransitionToMenu) <= 1);
            if c.state() == SessionState::AllFound {
                prop_assert_eq!(c.found_count(), 3);
            }

            // Nothing is shown after the round is decided.
            let commands = sink.into_inner();
            if let Some(end) = commands
                .iter()
                .position(|cmd| cmd.kind() == SessionCommandKind::ShowEndMessage)
            {
                for cmd in &commands[end..] {
                    let shown_after_end = matches!(
                        cmd,
                        SessionCommand::ShowHint(_)
                            | SessionCommand::FlashWarning
                            | SessionCommand::MarkFound(_)
                            | SessionCommand::TimeChanged { .. }
                    );
                    prop_assert!(!shown_after_end, "{:?} sent after the end message", cmd);
                }
            }
        }
    }
}
