#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic escalation-based wave generation system.
//!
//! Each wave is derived from the previous one: the lowest tier that reached
//! the spawn cap is evicted and one spawn of the next tier up is added, or,
//! when nothing is saturated, one spawn of the lowest escalating tier is
//! added. The primary ruleset runs for a fixed number of waves. The
//! secondary ruleset keeps a filler tier in every wave, splices in
//! double-filler transition waves, stops once the top tier doubles up, and
//! closes with fixed boss waves.

use std::num::NonZeroU32;

use fight_cave_waves_core::{
    roster, Encounter, GenerationError, MonsterTier, TerminalWaves, WaveComposition,
    WaveSequence, MAX_SPAWNS_PER_TIER,
};
use tracing::{debug, trace, warn};

/// Default bound on secondary escalation steps before generation is abandoned.
pub const DEFAULT_ITERATION_LIMIT: usize = 200;

const DOUBLE: NonZeroU32 = NonZeroU32::MIN.saturating_add(1);

/// Configuration parameters required to construct the generation system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_spawns_per_tier: NonZeroU32,
    iteration_limit: usize,
}

impl Config {
    /// Creates a configuration using the provided spawn cap and iteration bound.
    #[must_use]
    pub const fn new(max_spawns_per_tier: NonZeroU32, iteration_limit: usize) -> Self {
        Self {
            max_spawns_per_tier,
            iteration_limit,
        }
    }

    /// Number of spawns at which a tier is evicted from the next wave.
    #[must_use]
    pub const fn max_spawns_per_tier(&self) -> NonZeroU32 {
        self.max_spawns_per_tier
    }

    /// Maximum number of secondary escalation steps.
    #[must_use]
    pub const fn iteration_limit(&self) -> usize {
        self.iteration_limit
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(MAX_SPAWNS_PER_TIER, DEFAULT_ITERATION_LIMIT)
    }
}

/// Pure system that derives wave sequences from ordered tier rosters.
#[derive(Debug, Default)]
pub struct WaveGeneration {
    config: Config,
}

impl WaveGeneration {
    /// Creates a new generation system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration the system was created with.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Generates `wave_count` waves from a single escalating roster.
    ///
    /// Wave 1 is one spawn of `tiers[0]`.
    pub fn primary(
        &self,
        tiers: &[MonsterTier],
        wave_count: usize,
    ) -> Result<WaveSequence, GenerationError> {
        let first = tiers.first().ok_or(GenerationError::EmptyRoster)?;
        if wave_count == 0 {
            return Err(GenerationError::ZeroWaveCount);
        }

        let mut previous = WaveComposition::single(first.clone(), first.units_per_spawn());
        let mut waves = Vec::with_capacity(wave_count);
        waves.push(previous.clone());

        while waves.len() < wave_count {
            previous = self.escalate(&previous, tiers, 0)?;
            waves.push(previous.clone());
        }

        debug!(tiers = tiers.len(), waves = waves.len(), "generated primary wave sequence");
        Ok(WaveSequence::new(waves))
    }

    /// Generates waves from a roster whose first tier is a constant filler.
    ///
    /// The wave count is derived: escalation stops after the first wave with
    /// exactly two tiers, one of them doubled, that contains the top tier.
    /// The three waves from `terminal` are appended afterwards.
    pub fn secondary(
        &self,
        tiers: &[MonsterTier],
        terminal: &TerminalWaves,
    ) -> Result<WaveSequence, GenerationError> {
        let (filler, first, top) = match tiers {
            [] => return Err(GenerationError::EmptyRoster),
            [filler, first, .., top] => (filler, first, top),
            _ => {
                return Err(GenerationError::TooFewTiers {
                    required: 3,
                    actual: tiers.len(),
                })
            }
        };
        if tiers[1..].contains(filler) {
            return Err(GenerationError::FillerMismatch(filler.name().to_owned()));
        }

        let double_filler =
            WaveComposition::single(filler.clone(), filler.units_per_spawn().saturating_mul(DOUBLE));
        let mut previous: WaveComposition = [
            (filler.clone(), filler.units_per_spawn()),
            (first.clone(), first.units_per_spawn()),
        ]
        .into_iter()
        .collect();
        let mut waves = vec![previous.clone()];
        let mut iterations = 0;

        loop {
            // The spliced filler wave is never fed back in as `previous`.
            if is_transition_wave(&previous) {
                if previous.contains(top) {
                    break;
                }
                trace!(wave = waves.len() + 1, "inserting double filler wave");
                waves.push(double_filler.clone());
            }

            if iterations == self.config.iteration_limit {
                warn!(
                    limit = self.config.iteration_limit,
                    "secondary escalation did not reach the top tier"
                );
                return Err(GenerationError::IterationLimitExceeded {
                    limit: self.config.iteration_limit,
                });
            }
            iterations += 1;

            previous = self.escalate(&previous, tiers, 1)?;
            waves.push(previous.clone());
        }

        waves.extend(terminal.waves());
        debug!(
            tiers = tiers.len(),
            iterations,
            waves = waves.len(),
            "generated secondary wave sequence"
        );
        Ok(WaveSequence::new(waves))
    }

    /// Derives the wave following `previous`, scanning from `tiers[first_escalating]`.
    fn escalate(
        &self,
        previous: &WaveComposition,
        tiers: &[MonsterTier],
        first_escalating: usize,
    ) -> Result<WaveComposition, GenerationError> {
        let cap = self.config.max_spawns_per_tier.get();
        let mut next = previous.clone();

        let saturated = tiers
            .iter()
            .enumerate()
            .skip(first_escalating)
            .find(|(_, tier)| next.spawn_count(tier) == cap);

        let added = match saturated {
            Some((index, tier)) => {
                let _ = next.remove(tier);
                tiers
                    .get(index + 1)
                    .ok_or_else(|| GenerationError::EscalationExhausted {
                        tier: tier.name().to_owned(),
                    })?
            }
            None => tiers.get(first_escalating).ok_or(GenerationError::TooFewTiers {
                required: first_escalating + 1,
                actual: tiers.len(),
            })?,
        };

        next.add_spawn(added);
        Ok(next)
    }
}

/// Reports whether `wave` holds exactly two tiers with at least one at two spawns.
fn is_transition_wave(wave: &WaveComposition) -> bool {
    wave.distinct_tiers() == 2
        && wave
            .iter()
            .any(|(tier, quantity)| quantity == tier.units_per_spawn().saturating_mul(DOUBLE))
}

/// Wave tables for every supported encounter, built once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterTables {
    fight_caves: WaveSequence,
    inferno: WaveSequence,
}

impl EncounterTables {
    /// Generates both encounter tables from the built-in rosters.
    pub fn build(generation: &WaveGeneration) -> Result<Self, GenerationError> {
        let fight_caves = generation.primary(
            &roster::fight_cave_tiers(),
            Encounter::FightCaves.wave_count(),
        )?;
        let inferno =
            generation.secondary(&roster::inferno_tiers(), &roster::inferno_terminal_waves())?;

        verify_length(Encounter::FightCaves, &fight_caves)?;
        verify_length(Encounter::Inferno, &inferno)?;

        Ok(Self {
            fight_caves,
            inferno,
        })
    }

    /// Wave table of the provided encounter.
    #[must_use]
    pub fn sequence(&self, encounter: Encounter) -> &WaveSequence {
        match encounter {
            Encounter::FightCaves => &self.fight_caves,
            Encounter::Inferno => &self.inferno,
        }
    }
}

fn verify_length(encounter: Encounter, sequence: &WaveSequence) -> Result<(), GenerationError> {
    let expected = encounter.wave_count();
    if sequence.len() == expected {
        Ok(())
    } else {
        Err(GenerationError::UnexpectedLength {
            encounter,
            expected,
            actual: sequence.len(),
        })
    }
}
