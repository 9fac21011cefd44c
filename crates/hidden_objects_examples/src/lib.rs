#![forbid(unsafe_code)]
//! Shared helpers for the hidden_objects demo binaries.
mod player;
mod rendering;
mod theme_file;

pub use player::{RoundReport, ScriptedPlayer};
pub use rendering::{init_tracing, render_scene_to_png, RenderConfig};
pub use theme_file::{load_theme_ron, parse_theme_ron, theme_from_arg};
