//! Replays chat messages through the wave tracker.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use fight_cave_waves_core::Encounter;
use fight_cave_waves_system_wave_generation::EncounterTables;
use fight_cave_waves_system_wave_tracking::{
    panel::{wave_panel, DisplayConfig},
    ChatKind, HostEvent, TrackerEvent, WaveTracker,
};
use tracing::warn;

use crate::report::write_panel;

/// Feeds every line of `input` to a tracker as a game message received in `region`.
pub(crate) fn run_tracker(
    input: impl BufRead,
    region: u32,
    tables: &EncounterTables,
    config: &DisplayConfig,
    out: &mut impl Write,
) -> Result<()> {
    let regions = [region];
    if Encounter::from_regions(&regions).is_none() {
        warn!(region, "region hosts no tracked encounter; messages will be ignored");
    }

    let mut tracker = WaveTracker::new();
    let mut changes = Vec::new();
    for line in input.lines() {
        let text = line.context("failed to read chat message")?;
        changes.clear();
        tracker.handle(
            &[HostEvent::ChatMessage {
                kind: ChatKind::Game,
                text,
            }],
            &regions,
            &mut changes,
        );

        for change in &changes {
            match *change {
                TrackerEvent::WaveChanged { encounter, wave } => {
                    let sections = wave_panel(tables.sequence(encounter), Some(wave), config);
                    if sections.is_empty() {
                        warn!(%encounter, wave, "wave is outside the encounter table");
                    }
                    write_panel(out, &sections)?;
                }
                TrackerEvent::Reset => writeln!(out, "Tracking reset")?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use fight_cave_waves_core::{FIGHT_CAVE_REGION, INFERNO_REGION};
    use fight_cave_waves_system_wave_generation::WaveGeneration;
    use fight_cave_waves_system_wave_tracking::panel::WaveDisplayMode;

    use super::*;

    fn replay(input: &str, region: u32, config: &DisplayConfig) -> String {
        let tables = EncounterTables::build(&WaveGeneration::default()).expect("tables build");
        let mut out = Vec::new();
        run_tracker(input.as_bytes(), region, &tables, config, &mut out).expect("replay succeeds");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn inferno_completion_prints_the_following_wave() {
        let config = DisplayConfig {
            wave_display: WaveDisplayMode::Current,
            ..DisplayConfig::default()
        };
        let output = replay(
            "<col=ef1020>Wave: 1</col>\nWave completed!\n",
            INFERNO_REGION,
            &config,
        );
        assert_eq!(
            output,
            "Wave 1\n  3x Jal-Nib\n  1x Jal-MejRah\nWave 2\n  3x Jal-Nib\n  2x Jal-MejRah\n"
        );
    }

    #[test]
    fn final_fight_cave_wave_has_no_next_section() {
        let output = replay("Wave: 63\n", FIGHT_CAVE_REGION, &DisplayConfig::default());
        assert_eq!(output, "Wave 63\n  1x TzTok-Jad\n");
    }

    #[test]
    fn unrelated_messages_print_nothing() {
        let output = replay("Welcome to the game.\nWave: 3\n", 12_850, &DisplayConfig::default());
        assert!(output.is_empty());
    }
}
