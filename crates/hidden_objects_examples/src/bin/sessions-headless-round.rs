use std::time::Duration;

use hidden_objects::prelude::*;
use hidden_objects_examples::{init_tracing, ScriptedPlayer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let key = std::env::args().nth(1);
    let mut rng = StdRng::seed_from_u64(2024);

    let theme = resolve_theme(key.as_deref(), &mut rng);
    let scene = compose_round(&theme, &mut rng)?;
    let mut session = SessionController::new(&theme, scene);

    // Print what a renderer would be asked to do, skipping the per-second HUD noise.
    let mut log = FnSink::new(|cmd: SessionCommand| match cmd {
        SessionCommand::TimeChanged { .. } => {}
        other => info!("-> {other:?}"),
    });

    let player = ScriptedPlayer::default()
        .with_find_every(Duration::from_secs(12))
        .with_misclick_every(Some(Duration::from_secs(20)));
    let report = player.play(&mut session, &mut rng, &mut log);

    println!(
        "{}: {:?} after {:.1}s, {}/{} found, {} decoy clicks",
        theme.name,
        report.outcome,
        report.elapsed.as_secs_f32(),
        report.targets_found,
        session.total_targets(),
        report.decoy_clicks,
    );
    Ok(())
}
