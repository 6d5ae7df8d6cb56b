//! Text content of the wave overlay panel.

use fight_cave_waves_core::{format_monster_quantity, WaveComposition, WaveSequence};
use serde::{Deserialize, Serialize};

/// Which waves the panel lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveDisplayMode {
    /// Only the current wave.
    Current,
    /// Only the upcoming wave.
    Next,
    /// The current wave followed by the upcoming wave.
    #[default]
    Both,
}

impl WaveDisplayMode {
    const fn shows_current(self) -> bool {
        matches!(self, Self::Current | Self::Both)
    }

    const fn shows_next(self) -> bool {
        matches!(self, Self::Next | Self::Both)
    }
}

/// User-facing display preferences for the wave panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Which waves are listed.
    pub wave_display: WaveDisplayMode,
    /// Label monsters by category instead of by name.
    pub common_names: bool,
    /// Append each monster's combat level.
    pub show_monster_level: bool,
}

/// Titled group of monster lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelSection {
    /// Heading shown above the lines.
    pub header: String,
    /// One formatted line per tier, weakest first.
    pub lines: Vec<String>,
}

/// Builds the panel sections for `current_wave` of `sequence`.
///
/// Nothing is shown while no wave is tracked or when the wave lies outside
/// the sequence. The upcoming wave is omitted after the final wave.
#[must_use]
pub fn wave_panel(
    sequence: &WaveSequence,
    current_wave: Option<u32>,
    config: &DisplayConfig,
) -> Vec<PanelSection> {
    let Some(wave) = current_wave else {
        return Vec::new();
    };
    let Ok(current) = sequence.get(wave) else {
        return Vec::new();
    };

    let mut sections = Vec::with_capacity(2);
    if config.wave_display.shows_current() {
        sections.push(section(format!("Wave {wave}"), current, config));
    }
    if config.wave_display.shows_next() {
        if let Ok(next) = sequence.get(wave.saturating_add(1)) {
            sections.push(section("Next wave".to_owned(), next, config));
        }
    }
    sections
}

fn section(header: String, wave: &WaveComposition, config: &DisplayConfig) -> PanelSection {
    let mut monsters: Vec<_> = wave.iter().collect();
    monsters.sort_by_key(|(tier, _)| tier.level());

    let lines = monsters
        .into_iter()
        .map(|(tier, quantity)| {
            format_monster_quantity(
                tier,
                quantity.get(),
                config.common_names,
                config.show_monster_level,
            )
        })
        .collect();

    PanelSection { header, lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mode_flags() {
        assert!(WaveDisplayMode::Both.shows_current() && WaveDisplayMode::Both.shows_next());
        assert!(!WaveDisplayMode::Current.shows_next());
        assert!(!WaveDisplayMode::Next.shows_current());
    }

    #[test]
    fn untracked_wave_shows_nothing() {
        let sequence = WaveSequence::default();
        assert!(wave_panel(&sequence, None, &DisplayConfig::default()).is_empty());
        assert!(wave_panel(&sequence, Some(1), &DisplayConfig::default()).is_empty());
    }
}
