use std::fs;
use std::path::Path;

use anyhow::Context;
use hidden_objects::prelude::*;

/// Read a [`ThemeConfig`] from a RON file and validate it.
pub fn load_theme_ron(path: impl AsRef<Path>) -> anyhow::Result<ThemeConfig> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading theme {}", path.display()))?;
    parse_theme_ron(&text).with_context(|| format!("loading theme {}", path.display()))
}

/// Parse and validate a RON theme document.
pub fn parse_theme_ron(text: &str) -> anyhow::Result<ThemeConfig> {
    let theme: ThemeConfig = ron::from_str(text)?;
    theme.validate()?;
    Ok(theme)
}

/// A theme key or a path to a `.ron` file.
pub fn theme_from_arg(arg: &str) -> anyhow::Result<ThemeConfig> {
    if arg.ends_with(".ron") {
        load_theme_ron(arg)
    } else {
        Ok(theme_by_key(arg)?)
    }
}
