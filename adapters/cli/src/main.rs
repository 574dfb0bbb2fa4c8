#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a headless Gridflow battle.
//!
//! The adapter owns the loop the core deliberately does not: it bootstraps
//! a battlefield, advances ticks at its own cadence, pumps the analytics
//! system, and prints the final standings. Obstacle layouts can be exported
//! and re-imported as single-line strings.

mod layout_transfer;

use anyhow::{Context, Result};
use clap::Parser;
use gridflow_core::{Command, Event};
use gridflow_system_analytics::Analytics;
use gridflow_system_bootstrap::Config;
use gridflow_world::{self as world, query, World};
use layout_transfer::ObstacleLayoutSnapshot;

#[derive(Debug, Parser)]
#[command(name = "gridflow", about = "Headless Gridflow battlefield simulation")]
struct Args {
    /// Board width in cells.
    #[arg(long, default_value_t = 48)]
    width: i32,
    /// Board height in cells.
    #[arg(long, default_value_t = 32)]
    height: i32,
    /// Interior obstacle density in 0.0..=1.0.
    #[arg(long, default_value_t = 0.05)]
    density: f64,
    /// Particles deployed per team.
    #[arg(long, default_value_t = 80)]
    particles: u32,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 400)]
    ticks: u64,
    /// Seed for the obstacle scatter and particle deployment.
    #[arg(long, default_value_t = 0x6772_6466)]
    seed: u64,
    /// Obstacle layout string to import instead of the seeded scatter.
    #[arg(long)]
    layout: Option<String>,
    /// Print the obstacle layout string after bootstrap and exit.
    #[arg(long, default_value_t = false)]
    export_layout: bool,
}

/// Entry point for the Gridflow command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let mut battlefield = World::new();
    let mut analytics = Analytics::new();

    let config = bootstrap(&mut battlefield, &mut analytics, &args)?;

    if args.export_layout {
        println!("{}", ObstacleLayoutSnapshot::capture(&battlefield).encode());
        return Ok(());
    }

    let (width, height) = query::dimensions(&battlefield);
    println!(
        "gridflow: {width}x{height} board, {} teams, seed {:#x}",
        config.teams().len(),
        args.seed
    );

    let completed = run_battle(&mut battlefield, &mut analytics, args.ticks);
    print_standings(&battlefield, &analytics, completed);

    Ok(())
}

/// Applies the bootstrap command batches and returns the used configuration.
fn bootstrap(battlefield: &mut World, analytics: &mut Analytics, args: &Args) -> Result<Config> {
    let (layout_commands, config) = match &args.layout {
        Some(text) => {
            let snapshot =
                ObstacleLayoutSnapshot::decode(text).context("invalid obstacle layout string")?;
            let config = Config::standard_duel(
                snapshot.width,
                snapshot.height,
                0.0,
                args.particles,
                args.seed,
            )
            .context("imported layout does not fit a two-team battle")?;
            (snapshot.commands(), config)
        }
        None => {
            let config = Config::standard_duel(
                args.width,
                args.height,
                args.density,
                args.particles,
                args.seed,
            )
            .context("invalid battlefield configuration")?;
            (config.layout_commands(), config)
        }
    };

    let _ = pump(battlefield, analytics, layout_commands);
    let deployment = config.deployment_commands(battlefield);
    let _ = pump(battlefield, analytics, deployment);
    Ok(config)
}

/// Advances ticks until the budget runs out or one team stands alone.
fn run_battle(battlefield: &mut World, analytics: &mut Analytics, ticks: u64) -> u64 {
    for completed in 1..=ticks {
        let events = pump(battlefield, analytics, vec![Command::Tick]);
        for event in &events {
            if let Event::TeamEliminated { team } = event {
                println!("tick {completed}: team {} eliminated", team.get());
            }
        }

        let survivors = query::team_view(battlefield)
            .into_vec()
            .into_iter()
            .filter(|team| team.active)
            .count();
        if survivors <= 1 {
            return completed;
        }
    }
    ticks
}

/// Applies a command batch and feeds the resulting events to analytics.
fn pump(battlefield: &mut World, analytics: &mut Analytics, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in &commands {
        world::apply(battlefield, *command, &mut events);
    }
    let mut published = Vec::new();
    analytics.handle(
        &events,
        &commands,
        || Some(query::standings(battlefield)),
        &mut published,
    );
    events.extend(published);
    events
}

/// Prints the final standings, preferring the analytics system's report.
fn print_standings(battlefield: &World, analytics: &Analytics, completed: u64) {
    let report = analytics
        .last_report()
        .cloned()
        .unwrap_or_else(|| query::standings(battlefield));

    println!("after {completed} ticks:");
    for standing in &report.standings {
        let status = if standing.active { "active" } else { "eliminated" };
        println!(
            "  team {}: {} particles, {} total vitality ({status})",
            standing.team.get(),
            standing.population,
            standing.total_vitality
        );
    }

    let mut survivors = report.standings.iter().filter(|standing| standing.active);
    if let (Some(winner), None) = (survivors.next(), survivors.next()) {
        println!("team {} holds the field", winner.team.get());
    }
}
