//! GHQ CLI - Command-line interface
//!
//! Commands:
//! - moves: List the allowed actions of a position
//! - eval: Score a position and show bombardment, engagement and result
//! - analyze: Rank every allowed action by the resulting evaluation
//! - selfplay: Play games between random and greedy drivers
//! - tutorials: List the named tutorial and puzzle boards

mod analyze;
mod common;
mod eval_cmd;
mod moves;
mod selfplay;
mod tutorials;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ghq")]
#[command(about = "GHQ rules engine and analysis tools")]
struct Cli {
    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List allowed actions
    Moves(moves::MovesArgs),
    /// Evaluate a position
    Eval(eval_cmd::EvalArgs),
    /// Rank allowed actions by evaluation
    Analyze(analyze::AnalyzeArgs),
    /// Play games between simple drivers
    Selfplay(selfplay::SelfplayArgs),
    /// List tutorial and puzzle boards
    Tutorials(tutorials::TutorialsArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves(args) => moves::run(args),
        Commands::Eval(args) => eval_cmd::run(args),
        Commands::Analyze(args) => analyze::run(args),
        Commands::Selfplay(args) => selfplay::run(args, cli.seed),
        Commands::Tutorials(args) => tutorials::run(args),
    }
}
