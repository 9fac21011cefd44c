use hidden_objects::prelude::*;
use hidden_objects_examples::{init_tracing, render_scene_to_png, theme_from_arg, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let arg = std::env::args().nth(1).unwrap_or_else(|| "beach".to_owned());
    let theme = theme_from_arg(&arg)?;

    let mut rng = StdRng::seed_from_u64(42);
    let scene = compose_round(&theme, &mut rng)?;

    for target in scene.targets() {
        let label = theme.object(target.spec_index).map_or("?", |s| s.label.as_str());
        println!(
            "target {} {label} at ({:.0}, {:.0})",
            target.id, target.position.x, target.position.y
        );
    }

    let cfg = RenderConfig::new((1200, 700)).with_revealed_targets(true);
    render_scene_to_png(&scene, &theme, &cfg, format!("scenes-compose-{}.png", theme.key))?;
    Ok(())
}
