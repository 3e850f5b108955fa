//! Skirmish CLI - Command-line interface for running bot battles.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Skirmish - A deterministic bot-battle engine
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single match between built-in bots
    Run {
        /// Bot names (2-6 bots required; see `skirmish bots`)
        #[arg(required = true, num_args = 2..=6)]
        bots: Vec<String>,

        /// Maximum steps (default: 200)
        #[arg(short, long, default_value = "200")]
        steps: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// Suppress step-by-step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run a round-robin tournament and aggregate statistics
    Tournament {
        /// Bot names (default: every built-in bot)
        #[arg(num_args = 0..)]
        bots: Vec<String>,

        /// Maximum steps per match (default: 200)
        #[arg(short, long, default_value = "200")]
        steps: u32,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// List the built-in bots
    Bots,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            bots,
            steps,
            format,
            save,
            quiet,
        } => cli::run::execute(bots, steps, format, save, quiet),

        Commands::Tournament {
            bots,
            steps,
            threads,
            format,
            progress,
        } => cli::tournament::execute(bots, steps, threads, format, progress),

        Commands::Bots => cli::bots::execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
