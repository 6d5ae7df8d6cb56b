//! Text and JSON renderings of wave tables.

use std::io::{self, Write};

use fight_cave_waves_core::{
    format_monster_quantity, MonsterCategory, MonsterTier, WaveComposition, WaveSequence,
};
use fight_cave_waves_system_wave_tracking::panel::{DisplayConfig, PanelSection};
use serde::Serialize;

/// One wave of an encounter as emitted by `list --json`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct WaveReport<'a> {
    wave: u32,
    monsters: Vec<MonsterReport<'a>>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct MonsterReport<'a> {
    name: &'a str,
    category: MonsterCategory,
    level: u32,
    quantity: u32,
}

/// Builds one report per wave, monsters ordered weakest first.
pub(crate) fn wave_reports(sequence: &WaveSequence) -> Vec<WaveReport<'_>> {
    (1u32..)
        .zip(sequence.iter())
        .map(|(wave, composition)| WaveReport {
            wave,
            monsters: by_level(composition)
                .into_iter()
                .map(|(tier, quantity)| MonsterReport {
                    name: tier.name(),
                    category: tier.category(),
                    level: tier.level(),
                    quantity,
                })
                .collect(),
        })
        .collect()
}

/// Writes one line per wave, e.g. `Wave 5: 2x Tz-Kih, 1x Tz-Kek`.
pub(crate) fn write_wave_list(
    out: &mut impl Write,
    sequence: &WaveSequence,
    config: &DisplayConfig,
) -> io::Result<()> {
    for (wave, composition) in (1u32..).zip(sequence.iter()) {
        let monsters: Vec<String> = by_level(composition)
            .into_iter()
            .map(|(tier, quantity)| {
                format_monster_quantity(
                    tier,
                    quantity,
                    config.common_names,
                    config.show_monster_level,
                )
            })
            .collect();
        writeln!(out, "Wave {wave}: {}", monsters.join(", "))?;
    }
    Ok(())
}

/// Writes panel sections as a header followed by indented lines.
pub(crate) fn write_panel(out: &mut impl Write, sections: &[PanelSection]) -> io::Result<()> {
    for section in sections {
        writeln!(out, "{}", section.header)?;
        for line in &section.lines {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

fn by_level(composition: &WaveComposition) -> Vec<(&MonsterTier, u32)> {
    let mut monsters: Vec<_> = composition
        .iter()
        .map(|(tier, quantity)| (tier, quantity.get()))
        .collect();
    monsters.sort_by_key(|(tier, _)| tier.level());
    monsters
}
