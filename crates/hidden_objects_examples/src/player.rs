use std::time::Duration;

use hidden_objects::prelude::*;
use hidden_objects::scene::selection::pick_uniform;
use rand::RngCore;
use tracing::debug;

/// Simulated player for headless rounds: finds one random target every
/// `find_every` and optionally misclicks a random decoy every `misclick_every`.
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    pub find_every: Duration,
    pub misclick_every: Option<Duration>,
    /// Host frame length used to advance the session clock.
    pub frame: Duration,
}

/// What happened during [`ScriptedPlayer::play`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub outcome: Option<RoundOutcome>,
    pub elapsed: Duration,
    pub targets_found: usize,
    pub decoy_clicks: usize,
}

impl Default for ScriptedPlayer {
    fn default() -> Self {
        Self {
            find_every: Duration::from_secs(7),
            misclick_every: Some(Duration::from_secs(3)),
            frame: Duration::from_millis(16),
        }
    }
}

impl ScriptedPlayer {
    pub fn with_find_every(mut self, every: Duration) -> Self {
        self.find_every = every;
        self
    }

    pub fn with_misclick_every(mut self, every: Option<Duration>) -> Self {
        self.misclick_every = every;
        self
    }

    /// Start `session` and drive it frame by frame until it reaches `Ended`.
    pub fn play(
        &self,
        session: &mut SessionController,
        rng: &mut dyn RngCore,
        sink: &mut dyn CommandSink,
    ) -> RoundReport {
        let frame = self.frame.max(Duration::from_millis(1));
        let mut next_find = self.find_every;
        let mut next_misclick = self.misclick_every;
        let mut decoy_clicks = 0;

        session.start(sink);
        while session.state() != SessionState::Ended {
            session.advance(frame, sink);
            let now = session.now();

            if session.state().is_active() && now >= next_find {
                next_find += self.find_every;
                let unfound: Vec<ObjectId> =
                    session.scene().unfound_targets().map(|o| o.id).collect();
                if let Some(&id) = pick_uniform(&unfound, rng) {
                    debug!("Player clicks target {id} at {:?}.", now);
                    session.on_object_clicked(id, sink);
                }
            }

            if let Some(at) = next_misclick.filter(|at| now >= *at) {
                next_misclick = self.misclick_every.map(|every| at + every);
                let decoys: Vec<ObjectId> =
                    session.scene().decoys().iter().map(|o| o.id).collect();
                if session.state().is_active() {
                    if let Some(&id) = pick_uniform(&decoys, rng) {
                        session.on_object_clicked(id, sink);
                        decoy_clicks += 1;
                    }
                }
            }
        }

        RoundReport {
            outcome: session.outcome(),
            elapsed: session.now(),
            targets_found: session.found_count(),
            decoy_clicks,
        }
    }
}
