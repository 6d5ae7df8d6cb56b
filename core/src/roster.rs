//! Tier rosters for the supported encounters, listed in escalation order.
//!
//! The position of each tier is significant: generation evicts tiers and
//! promotes their successor by index, so these lists must not be re-sorted.

use std::num::NonZeroU32;

use crate::{MonsterCategory, MonsterTier, TerminalWaves};

/// Nibblers always spawn in groups of three.
const NIBBLERS_PER_SPAWN: NonZeroU32 = NonZeroU32::MIN.saturating_add(2);

/// Escalating tiers of the Fight Caves, weakest first.
#[must_use]
pub fn fight_cave_tiers() -> Vec<MonsterTier> {
    vec![
        MonsterTier::single("Tz-Kih", MonsterCategory::Bat, 22),
        MonsterTier::single("Tz-Kek", MonsterCategory::Blob, 45),
        MonsterTier::single("Tok-Xil", MonsterCategory::Ranger, 90),
        MonsterTier::single("Yt-MejKot", MonsterCategory::Melee, 180),
        MonsterTier::single("Ket-Zek", MonsterCategory::Mage, 360),
        MonsterTier::single("TzTok-Jad", MonsterCategory::Jad, 702),
    ]
}

/// Tiers of the Inferno, starting with the nibbler filler tier.
#[must_use]
pub fn inferno_tiers() -> Vec<MonsterTier> {
    vec![
        MonsterTier::new("Jal-Nib", MonsterCategory::Nibbler, 32, NIBBLERS_PER_SPAWN),
        MonsterTier::single("Jal-MejRah", MonsterCategory::Bat, 85),
        MonsterTier::single("Jal-Ak", MonsterCategory::Blob, 165),
        MonsterTier::single("Jal-ImKot", MonsterCategory::Melee, 240),
        MonsterTier::single("Jal-Xil", MonsterCategory::Ranger, 370),
        MonsterTier::single("Jal-Zek", MonsterCategory::Mage, 490),
    ]
}

/// Boss waves closing out the Inferno.
#[must_use]
pub fn inferno_terminal_waves() -> TerminalWaves {
    TerminalWaves::new(
        MonsterTier::single("JalTok-Jad", MonsterCategory::Jad, 900),
        MonsterTier::single("TzKal-Zuk", MonsterCategory::Zuk, 1400),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ascending_levels(tiers: &[MonsterTier]) {
        for pair in tiers.windows(2) {
            assert!(
                pair[0].level() < pair[1].level(),
                "{} should be weaker than {}",
                pair[0].name(),
                pair[1].name()
            );
        }
    }

    #[test]
    fn rosters_are_listed_weakest_first() {
        assert_ascending_levels(&fight_cave_tiers());
        assert_ascending_levels(&inferno_tiers());
    }

    #[test]
    fn only_the_inferno_filler_spawns_in_groups() {
        let inferno = inferno_tiers();
        assert_eq!(inferno[0].units_per_spawn().get(), 3);
        assert!(inferno[1..]
            .iter()
            .chain(fight_cave_tiers().iter())
            .all(|tier| tier.units_per_spawn().get() == 1));
    }

    #[test]
    fn inferno_bosses_outrank_every_escalating_tier() {
        let terminal = inferno_terminal_waves();
        let strongest = inferno_tiers()
            .iter()
            .map(MonsterTier::level)
            .max()
            .expect("roster is not empty");
        assert!(terminal.top_special().level() > strongest);
        assert!(terminal.final_boss().level() > terminal.top_special().level());
    }
}
