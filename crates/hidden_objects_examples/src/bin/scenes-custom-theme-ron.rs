use hidden_objects::prelude::*;
use hidden_objects_examples::{init_tracing, load_theme_ron, render_scene_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let path = format!(
        "{}/assets/themes/volcano.ron",
        env!("CARGO_MANIFEST_DIR")
    );
    let theme = load_theme_ron(&path)?;

    let mut rng = StdRng::seed_from_u64(7);
    let scene = compose_round(&theme, &mut rng)?;

    let cfg = RenderConfig::new((1200, 700));
    render_scene_to_png(&scene, &theme, &cfg, "scenes-custom-theme-ron.png")?;
    render_scene_to_png(
        &scene,
        &theme,
        &cfg.with_revealed_targets(true),
        "scenes-custom-theme-ron-solution.png",
    )?;
    Ok(())
}
