//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use fight_cave_waves_core::Encounter;
use fight_cave_waves_system_wave_tracking::panel::WaveDisplayMode;

/// Wave tables for the Fight Caves and the Inferno.
#[derive(Debug, Parser)]
#[command(name = "fight-cave-waves", version, about)]
pub(crate) struct Args {
    /// TOML file holding display preferences.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print every wave of an encounter.
    List {
        #[arg(short, long, value_enum)]
        encounter: EncounterArg,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the panel for a single wave.
    Show {
        #[arg(short, long, value_enum)]
        encounter: EncounterArg,
        /// 1-based wave number.
        #[arg(short, long)]
        wave: u32,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Follow chat messages and print the panel whenever the wave changes.
    Track {
        /// Map region the messages were received in.
        #[arg(short, long)]
        region: u32,
        /// File of chat messages, one per line. Reads stdin when omitted.
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        #[command(flatten)]
        display: DisplayArgs,
    },
}

/// Flags overriding the configured display preferences.
#[derive(Debug, Default, clap::Args)]
pub(crate) struct DisplayArgs {
    /// Which waves the panel lists.
    #[arg(short, long, value_enum)]
    pub(crate) mode: Option<ModeArg>,
    /// Label monsters by category.
    #[arg(long)]
    pub(crate) common_names: bool,
    /// Append monster combat levels.
    #[arg(long)]
    pub(crate) show_level: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum EncounterArg {
    FightCaves,
    Inferno,
}

impl From<EncounterArg> for Encounter {
    fn from(value: EncounterArg) -> Self {
        match value {
            EncounterArg::FightCaves => Encounter::FightCaves,
            EncounterArg::Inferno => Encounter::Inferno,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    Current,
    Next,
    Both,
}

impl From<ModeArg> for WaveDisplayMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Current => WaveDisplayMode::Current,
            ModeArg::Next => WaveDisplayMode::Next,
            ModeArg::Both => WaveDisplayMode::Both,
        }
    }
}
