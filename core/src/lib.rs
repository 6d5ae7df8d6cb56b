#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Fight Cave Waves crates.
//!
//! This crate defines the data model that connects the wave generator, the
//! wave tracker, and adapters. Rosters list [`MonsterTier`] values in
//! escalation order, the generator derives a [`WaveSequence`] of
//! [`WaveComposition`] values from each roster exactly once, and consumers
//! query the resulting tables by 1-based wave number.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod roster;

/// Maximum number of spawns a tier may reach within a single wave before it is evicted.
pub const MAX_SPAWNS_PER_TIER: NonZeroU32 = NonZeroU32::MIN.saturating_add(1);

/// Map region containing the Fight Caves.
pub const FIGHT_CAVE_REGION: u32 = 9551;

/// Map region containing the Inferno.
pub const INFERNO_REGION: u32 = 9043;

/// Generic classification of a monster used for common-name display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterCategory {
    /// Small melee filler that attacks the pillars.
    Nibbler,
    /// Fast, weak flyer.
    Bat,
    /// Splits into smaller blobs on death.
    Blob,
    /// Ranged attacker.
    Ranger,
    /// Melee attacker that digs toward the player.
    Melee,
    /// Magic attacker able to resurrect fallen monsters.
    Mage,
    /// Prayer-switching boss.
    Jad,
    /// Final boss of the Inferno.
    Zuk,
}

impl MonsterCategory {
    /// Title-cased common name of the category.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Nibbler => "Nibbler",
            Self::Bat => "Bat",
            Self::Blob => "Blob",
            Self::Ranger => "Ranger",
            Self::Melee => "Melee",
            Self::Mage => "Mage",
            Self::Jad => "Jad",
            Self::Zuk => "Zuk",
        }
    }
}

impl fmt::Display for MonsterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One named kind of monster that may appear in a wave.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterTier {
    name: String,
    category: MonsterCategory,
    level: u32,
    units_per_spawn: NonZeroU32,
}

impl MonsterTier {
    /// Creates a tier whose spawn events contribute `units_per_spawn` monsters each.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: MonsterCategory,
        level: u32,
        units_per_spawn: NonZeroU32,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            level,
            units_per_spawn,
        }
    }

    /// Creates a tier whose spawn events contribute a single monster.
    #[must_use]
    pub fn single(name: impl Into<String>, category: MonsterCategory, level: u32) -> Self {
        Self::new(name, category, level, NonZeroU32::MIN)
    }

    /// In-game name of the monster.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generic classification of the monster.
    #[must_use]
    pub const fn category(&self) -> MonsterCategory {
        self.category
    }

    /// Combat level of the monster. Only used for ordering and display.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Number of monsters contributed by one spawn event of this tier.
    #[must_use]
    pub const fn units_per_spawn(&self) -> NonZeroU32 {
        self.units_per_spawn
    }

    /// Builds the label shown for this tier, e.g. `Jal-Nib` or `Nibbler - Level 32`.
    #[must_use]
    pub fn display_name(&self, common_name: bool, show_level: bool) -> String {
        let mut label = if common_name {
            self.category.title().to_owned()
        } else {
            self.name.clone()
        };

        if show_level {
            label.push_str(" - Level ");
            label.push_str(&self.level.to_string());
        }

        label
    }
}

/// Formats a single `(tier, quantity)` pair as `"<quantity>x <label>"`.
#[must_use]
pub fn format_monster_quantity(
    tier: &MonsterTier,
    quantity: u32,
    common_name: bool,
    show_level: bool,
) -> String {
    format!("{quantity}x {}", tier.display_name(common_name, show_level))
}

/// Monsters present in one wave, keyed by tier.
///
/// Quantities are always positive; tiers that drop to zero are removed rather than stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WaveComposition {
    units: BTreeMap<MonsterTier, NonZeroU32>,
}

impl WaveComposition {
    /// Creates an empty composition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a composition holding a single tier at the provided quantity.
    #[must_use]
    pub fn single(tier: MonsterTier, quantity: NonZeroU32) -> Self {
        let mut units = BTreeMap::new();
        let _ = units.insert(tier, quantity);
        Self { units }
    }

    /// Number of monsters of `tier` present in the wave, zero when absent.
    #[must_use]
    pub fn quantity(&self, tier: &MonsterTier) -> u32 {
        self.units.get(tier).map_or(0, |quantity| quantity.get())
    }

    /// Number of whole spawn events of `tier` present in the wave.
    #[must_use]
    pub fn spawn_count(&self, tier: &MonsterTier) -> u32 {
        self.quantity(tier) / tier.units_per_spawn().get()
    }

    /// Adds one spawn event worth of `tier` to the wave.
    pub fn add_spawn(&mut self, tier: &MonsterTier) {
        let quantity = tier.units_per_spawn().saturating_add(self.quantity(tier));
        let _ = self.units.insert(tier.clone(), quantity);
    }

    /// Removes `tier` from the wave entirely, returning its previous quantity.
    pub fn remove(&mut self, tier: &MonsterTier) -> Option<NonZeroU32> {
        self.units.remove(tier)
    }

    /// Reports whether `tier` is present in the wave.
    #[must_use]
    pub fn contains(&self, tier: &MonsterTier) -> bool {
        self.units.contains_key(tier)
    }

    /// Number of distinct tiers present in the wave.
    #[must_use]
    pub fn distinct_tiers(&self) -> usize {
        self.units.len()
    }

    /// Reports whether the wave contains no monsters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Total number of monsters across all tiers.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.units
            .values()
            .fold(0u32, |total, quantity| total.saturating_add(quantity.get()))
    }

    /// Iterator over `(tier, quantity)` pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&MonsterTier, NonZeroU32)> + '_ {
        self.units.iter().map(|(tier, quantity)| (tier, *quantity))
    }
}

impl FromIterator<(MonsterTier, NonZeroU32)> for WaveComposition {
    fn from_iter<I: IntoIterator<Item = (MonsterTier, NonZeroU32)>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

/// Ordered, immutable list of wave compositions where index zero is wave 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaveSequence {
    waves: Vec<WaveComposition>,
}

impl WaveSequence {
    /// Wraps the provided waves. The first entry becomes wave 1.
    #[must_use]
    pub fn new(waves: Vec<WaveComposition>) -> Self {
        Self { waves }
    }

    /// Returns the composition of the 1-based `wave`.
    pub fn get(&self, wave: u32) -> Result<&WaveComposition, WaveOutOfRange> {
        let out_of_range = WaveOutOfRange {
            wave,
            len: self.waves.len(),
        };
        let index = usize::try_from(wave)
            .ok()
            .and_then(|wave| wave.checked_sub(1))
            .ok_or(out_of_range)?;
        self.waves.get(index).ok_or(out_of_range)
    }

    /// Number of waves in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    /// Reports whether the sequence holds no waves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Iterator over the waves in order, starting at wave 1.
    pub fn iter(&self) -> impl Iterator<Item = &WaveComposition> {
        self.waves.iter()
    }
}

/// Encounters whose waves are tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encounter {
    /// The 63-wave Fight Caves.
    FightCaves,
    /// The 69-wave Inferno.
    Inferno,
}

impl Encounter {
    /// Every supported encounter.
    pub const ALL: [Encounter; 2] = [Encounter::FightCaves, Encounter::Inferno];

    /// Map region in which the encounter takes place.
    #[must_use]
    pub const fn region(self) -> u32 {
        match self {
            Self::FightCaves => FIGHT_CAVE_REGION,
            Self::Inferno => INFERNO_REGION,
        }
    }

    /// Number of waves in the encounter.
    #[must_use]
    pub const fn wave_count(self) -> usize {
        match self {
            Self::FightCaves => 63,
            Self::Inferno => 69,
        }
    }

    /// Resolves the encounter for the loaded map regions, preferring the Fight Caves.
    #[must_use]
    pub fn from_regions(regions: &[u32]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|encounter| regions.contains(&encounter.region()))
    }
}

impl fmt::Display for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FightCaves => f.write_str("Fight Caves"),
            Self::Inferno => f.write_str("Inferno"),
        }
    }
}

/// Fixed boss waves appended after the escalating waves of a secondary encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalWaves {
    top_special: MonsterTier,
    final_boss: MonsterTier,
}

impl TerminalWaves {
    /// Creates the terminal markers for an encounter.
    #[must_use]
    pub fn new(top_special: MonsterTier, final_boss: MonsterTier) -> Self {
        Self {
            top_special,
            final_boss,
        }
    }

    /// Boss that appears alone and then as a triple.
    #[must_use]
    pub fn top_special(&self) -> &MonsterTier {
        &self.top_special
    }

    /// Boss of the final wave.
    #[must_use]
    pub fn final_boss(&self) -> &MonsterTier {
        &self.final_boss
    }

    /// The three closing waves: one top special, three top specials, one final boss.
    #[must_use]
    pub fn waves(&self) -> [WaveComposition; 3] {
        const TRIPLE: NonZeroU32 = NonZeroU32::MIN.saturating_add(2);
        [
            WaveComposition::single(self.top_special.clone(), NonZeroU32::MIN),
            WaveComposition::single(self.top_special.clone(), TRIPLE),
            WaveComposition::single(self.final_boss.clone(), NonZeroU32::MIN),
        ]
    }
}

/// Reasons a wave sequence could not be generated from a roster.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The roster contained no tiers.
    #[error("tier roster is empty")]
    EmptyRoster,
    /// The roster contained fewer tiers than the ruleset requires.
    #[error("tier roster needs at least {required} tiers, found {actual}")]
    TooFewTiers {
        /// Minimum number of tiers required.
        required: usize,
        /// Number of tiers supplied.
        actual: usize,
    },
    /// A wave count of zero was requested.
    #[error("wave count must be at least 1")]
    ZeroWaveCount,
    /// The filler tier was listed again among the escalating tiers.
    #[error("filler tier '{0}' also appears as an escalating tier")]
    FillerMismatch(String),
    /// The highest tier saturated and no tier follows it.
    #[error("tier '{tier}' saturated but no higher tier follows it")]
    EscalationExhausted {
        /// Name of the saturated tier.
        tier: String,
    },
    /// Escalation did not terminate within the iteration bound.
    #[error("wave escalation did not terminate within {limit} iterations")]
    IterationLimitExceeded {
        /// Iteration bound that was exceeded.
        limit: usize,
    },
    /// An encounter table was generated with the wrong number of waves.
    #[error("{encounter} table has {actual} waves, expected {expected}")]
    UnexpectedLength {
        /// Encounter whose table was built.
        encounter: Encounter,
        /// Wave count the encounter requires.
        expected: usize,
        /// Wave count that was generated.
        actual: usize,
    },
}

/// Lookup of a wave number outside `1..=len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("wave {wave} is outside the range 1..={len}")]
pub struct WaveOutOfRange {
    /// Requested 1-based wave number.
    pub wave: u32,
    /// Number of waves in the sequence.
    pub len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn units(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("non-zero quantity")
    }

    fn nibbler() -> MonsterTier {
        MonsterTier::new("Jal-Nib", MonsterCategory::Nibbler, 32, units(3))
    }

    fn bat() -> MonsterTier {
        MonsterTier::single("Tz-Kih", MonsterCategory::Bat, 22)
    }

    #[test]
    fn display_name_uses_category_for_common_names() {
        assert_eq!(bat().display_name(true, false), "Bat");
        assert_eq!(nibbler().display_name(true, false), "Nibbler");
        assert_eq!(nibbler().display_name(false, true), "Jal-Nib - Level 32");
    }

    #[test]
    fn format_appends_level_suffix_once() {
        let tier = bat();
        assert_eq!(format_monster_quantity(&tier, 2, false, false), "2x Tz-Kih");
        let with_level = format_monster_quantity(&tier, 2, false, true);
        assert_eq!(with_level, "2x Tz-Kih - Level 22");
        assert_eq!(with_level.matches(" - Level ").count(), 1);
    }

    #[test]
    fn add_spawn_accumulates_units_per_spawn() {
        let tier = nibbler();
        let mut wave = WaveComposition::new();
        wave.add_spawn(&tier);
        assert_eq!(wave.quantity(&tier), 3);
        assert_eq!(wave.spawn_count(&tier), 1);
        wave.add_spawn(&tier);
        assert_eq!(wave.quantity(&tier), 6);
        assert_eq!(wave.spawn_count(&tier), 2);
        assert_eq!(wave.distinct_tiers(), 1);
    }

    #[test]
    fn removed_tiers_are_absent_rather_than_zero() {
        let tier = bat();
        let mut wave = WaveComposition::single(tier.clone(), units(2));
        assert_eq!(wave.remove(&tier), Some(units(2)));
        assert!(!wave.contains(&tier));
        assert_eq!(wave.quantity(&tier), 0);
        assert!(wave.is_empty());
    }

    #[test]
    fn composition_equality_ignores_insertion_order() {
        let forward: WaveComposition = [(bat(), units(1)), (nibbler(), units(3))]
            .into_iter()
            .collect();
        let backward: WaveComposition = [(nibbler(), units(3)), (bat(), units(1))]
            .into_iter()
            .collect();
        assert_eq!(forward, backward);
        assert_eq!(forward.total_units(), 4);
    }

    #[test]
    fn sequence_lookup_is_one_based_and_bounded() {
        let sequence = WaveSequence::new(vec![
            WaveComposition::single(bat(), units(1)),
            WaveComposition::single(bat(), units(2)),
        ]);

        assert_eq!(sequence.get(1).map(|wave| wave.quantity(&bat())), Ok(1));
        assert_eq!(sequence.get(2).map(|wave| wave.quantity(&bat())), Ok(2));
        assert_eq!(sequence.get(0), Err(WaveOutOfRange { wave: 0, len: 2 }));
        assert_eq!(sequence.get(3), Err(WaveOutOfRange { wave: 3, len: 2 }));
    }

    #[test]
    fn terminal_waves_follow_fixed_pattern() {
        let jad = MonsterTier::single("JalTok-Jad", MonsterCategory::Jad, 900);
        let zuk = MonsterTier::single("TzKal-Zuk", MonsterCategory::Zuk, 1400);
        let [first, second, third] = TerminalWaves::new(jad.clone(), zuk.clone()).waves();
        assert_eq!(first, WaveComposition::single(jad.clone(), units(1)));
        assert_eq!(second, WaveComposition::single(jad, units(3)));
        assert_eq!(third, WaveComposition::single(zuk, units(1)));
    }

    #[test]
    fn encounter_resolves_from_regions() {
        assert_eq!(
            Encounter::from_regions(&[1, FIGHT_CAVE_REGION]),
            Some(Encounter::FightCaves)
        );
        assert_eq!(
            Encounter::from_regions(&[INFERNO_REGION]),
            Some(Encounter::Inferno)
        );
        assert_eq!(Encounter::from_regions(&[12_850]), None);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn monster_tier_round_trips_through_bincode() {
        assert_round_trip(&nibbler());
    }
}
