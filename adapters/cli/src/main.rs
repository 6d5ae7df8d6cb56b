#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that exposes the Fight Cave and Inferno wave tables.

mod cli;
mod config;
mod report;
mod track;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use clap::Parser;
use fight_cave_waves_core::Encounter;
use fight_cave_waves_system_wave_generation::{EncounterTables, WaveGeneration};
use fight_cave_waves_system_wave_tracking::panel::wave_panel;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

/// Entry point for the Fight Cave Waves command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let display = config::load_display_config(args.config.as_deref())?;
    let generation = WaveGeneration::default();
    let tables =
        EncounterTables::build(&generation).context("failed to generate encounter wave tables")?;
    debug!(
        max_spawns_per_tier = generation.config().max_spawns_per_tier().get(),
        iteration_limit = generation.config().iteration_limit(),
        "encounter wave tables ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::List { encounter, json } => {
            let sequence = tables.sequence(encounter.into());
            if json {
                serde_json::to_writer_pretty(&mut out, &report::wave_reports(sequence))
                    .context("failed to write wave report")?;
                writeln!(out)?;
            } else {
                report::write_wave_list(&mut out, sequence, &display)?;
            }
        }
        Command::Show {
            encounter,
            wave,
            display: overrides,
        } => {
            let encounter = Encounter::from(encounter);
            let sequence = tables.sequence(encounter);
            let _ = sequence
                .get(wave)
                .with_context(|| format!("the {encounter} has no wave {wave}"))?;
            let display = config::apply_overrides(display, &overrides);
            report::write_panel(&mut out, &wave_panel(sequence, Some(wave), &display))?;
        }
        Command::Track {
            region,
            input,
            display: overrides,
        } => {
            let display = config::apply_overrides(display, &overrides);
            let reader: Box<dyn BufRead> = match input {
                Some(path) => Box::new(BufReader::new(File::open(&path).with_context(|| {
                    format!("failed to open chat log {}", path.display())
                })?)),
                None => Box::new(io::stdin().lock()),
            };
            track::run_tracker(reader, region, &tables, &display, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fight_cave_waves=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
