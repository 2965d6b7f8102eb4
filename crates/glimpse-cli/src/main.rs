mod commands;
mod config;
mod render;
mod shutdown;
mod terminal;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use glimpse_core::{RoundType, parse_round_type};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "glimpse")]
#[command(about = "Reaction and memory game for the terminal")]
struct Args {
    #[arg(short, long, default_value = "glimpse.toml", global = true)]
    config: PathBuf,

    /// Seed the random source for a reproducible session
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play a full session (default)
    Play,
    /// Drill a single round type
    Practice {
        #[arg(value_parser = round_type_arg)]
        round: RoundType,
    },
    /// List the round catalog
    Rounds,
    /// Print a generated round and its question as JSON
    Inspect {
        #[arg(value_parser = round_type_arg)]
        round: RoundType,
    },
}

fn round_type_arg(s: &str) -> std::result::Result<RoundType, String> {
    parse_round_type(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("glimpse=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command.unwrap_or(Command::Play) {
        Command::Rounds => commands::rounds::run(),
        Command::Inspect { round } => commands::inspect::run(round, args.seed),
        Command::Play => {
            let config = CliConfig::load_or_default(&args.config).with_seed(args.seed);
            info!("Starting session");
            commands::play::run(config.engine)
        }
        Command::Practice { round } => {
            let config = CliConfig::load_or_default(&args.config).with_seed(args.seed);
            commands::play::run_practice(config.engine, round)
        }
    }
}
