//! Display preference loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fight_cave_waves_system_wave_tracking::panel::DisplayConfig;

use crate::cli::DisplayArgs;

/// Reads display preferences from `path`, falling back to defaults when no file is given.
pub(crate) fn load_display_config(path: Option<&Path>) -> Result<DisplayConfig> {
    let Some(path) = path else {
        return Ok(DisplayConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read display config {}", path.display()))?;
    let config = parse_display_config(&contents)
        .with_context(|| format!("failed to parse display config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded display config");
    Ok(config)
}

fn parse_display_config(contents: &str) -> Result<DisplayConfig> {
    toml::from_str(contents).context("invalid display config toml contents")
}

/// Applies command-line overrides on top of the loaded preferences.
pub(crate) fn apply_overrides(mut config: DisplayConfig, args: &DisplayArgs) -> DisplayConfig {
    if let Some(mode) = args.mode {
        config.wave_display = mode.into();
    }
    config.common_names |= args.common_names;
    config.show_monster_level |= args.show_level;
    config
}
