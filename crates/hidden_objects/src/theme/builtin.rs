//! The themes shipped with the game.
use rand::RngCore;
use tracing::warn;

use crate::error::{Error, Result};
use crate::sampling::rand_below;
use crate::theme::{Color, ObjectSpec, Shape, ThemeConfig};

fn beach() -> ThemeConfig {
    ThemeConfig::new("beach", "Sunny Beach")
        .with_colors(Color(0x87ceeb), Color(0xfff1c1))
        .with_world_size(2400.0, 1400.0)
        .with_min_distance(55.0)
        .with_decor_count(220)
        .with_target_range(2, 4)
        .with_time_limit(90)
        .with_hint_texture("hint_smile")
        .with_objects([
            ObjectSpec::decor(
                "beach_umbrella",
                "Umbrella",
                Shape::Circle { diameter: 72.0 },
                Color(0xff6384),
            ),
            ObjectSpec::decor(
                "beach_towel",
                "Towel",
                Shape::Rect { width: 96.0, height: 32.0 },
                Color(0xffc107),
            ),
            ObjectSpec::target(
                "beach_crab",
                "Crab",
                Shape::Rect { width: 40.0, height: 30.0 },
                Color(0xe91e63),
            ),
            ObjectSpec::target(
                "beach_ball",
                "Beach Ball",
                Shape::Circle { diameter: 48.0 },
                Color(0x4bc0c0),
            ),
        ])
}

fn museum() -> ThemeConfig {
    ThemeConfig::new("museum", "Dinosaur Museum")
        .with_colors(Color(0xe0f7fa), Color(0xfdf5e6))
        .with_world_size(2400.0, 1400.0)
        .with_min_distance(55.0)
        .with_decor_count(200)
        .with_target_range(3, 5)
        .with_time_limit(90)
        .with_hint_texture("hint_scary")
        .with_objects([
            ObjectSpec::decor(
                "museum_pedestal",
                "Pedestal",
                Shape::Rect { width: 80.0, height: 50.0 },
                Color(0xb0bec5),
            ),
            ObjectSpec::target(
                "museum_skeleton",
                "Dino Skull",
                Shape::Triangle { size: 80.0 },
                Color(0x8d6e63),
            ),
            ObjectSpec::decor(
                "museum_sign",
                "Sign",
                Shape::Rect { width: 100.0, height: 30.0 },
                Color(0xffca28),
            ),
            ObjectSpec::target(
                "museum_fossil",
                "Fossil",
                Shape::Circle { diameter: 48.0 },
                Color(0x6d4c41),
            ),
        ])
}

fn spaceport() -> ThemeConfig {
    ThemeConfig::new("spaceport", "Busy Spaceport")
        .with_colors(Color(0x050816), Color(0x101624))
        .with_world_size(2600.0, 1500.0)
        .with_min_distance(55.0)
        .with_decor_count(240)
        .with_target_range(3, 5)
        .with_time_limit(100)
        .with_hint_texture("hint_alien")
        .with_objects([
            ObjectSpec::decor(
                "space_ship",
                "Ship",
                Shape::Triangle { size: 80.0 },
                Color(0x03a9f4),
            ),
            ObjectSpec::decor(
                "space_crate",
                "Cargo Crate",
                Shape::Rect { width: 72.0, height: 48.0 },
                Color(0x9e9e9e),
            ),
            ObjectSpec::target(
                "space_alien",
                "Alien",
                Shape::Circle { diameter: 56.0 },
                Color(0x9c27b0),
            ),
            ObjectSpec::target(
                "space_robot",
                "Robot",
                Shape::Rect { width: 56.0, height: 56.0 },
                Color(0x00e5ff),
            ),
        ])
}

/// All built-in themes, in menu order.
pub fn builtin_themes() -> Vec<ThemeConfig> {
    vec![beach(), museum(), spaceport()]
}

/// Look up a built-in theme by key.
pub fn theme_by_key(key: &str) -> Result<ThemeConfig> {
    builtin_themes()
        .into_iter()
        .find(|t| t.key == key)
        .ok_or_else(|| Error::UnknownTheme { key: key.to_owned() })
}

/// Pick a built-in theme uniformly at random.
pub fn random_theme(rng: &mut dyn RngCore) -> ThemeConfig {
    let mut themes = builtin_themes();
    let index = rand_below(rng, themes.len());
    themes.swap_remove(index)
}

/// The theme for `key` if it exists, otherwise a random built-in theme.
pub fn resolve_theme(key: Option<&str>, rng: &mut dyn RngCore) -> ThemeConfig {
    match key.map(theme_by_key) {
        Some(Ok(theme)) => theme,
        Some(Err(e)) => {
            warn!("{e}; falling back to a random theme.");
            random_theme(rng)
        }
        None => random_theme(rng),
    }
}
