//! Eval command - score a position and show what drives the score

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use ghq_core::{
    bombarded_squares, engaged_pairs, free_infantry_captures, score_sides, terminal_state, Coordinate, GameOver,
    Position,
};

use crate::common::{ClockArgs, PositionArgs};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct EvalArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    #[command(flatten)]
    pub clock: ClockArgs,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything the command reports about one position
#[derive(Debug, Serialize)]
struct EvalReport {
    evaluation: f32,
    red_score: f32,
    blue_score: f32,
    /// Squares threatened by RED, by BLUE, row-major
    bombarded_by_red: Vec<Coordinate>,
    bombarded_by_blue: Vec<Coordinate>,
    engaged: Vec<(Coordinate, Coordinate)>,
    free_captures: Vec<(Coordinate, Coordinate)>,
    game_over: Option<GameOver>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: EvalArgs) -> Result<()> {
    let position = args.position.load()?;
    let report = build_report(&position, &args.clock)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&position, &report);
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_report(position: &Position, clock: &ClockArgs) -> Result<EvalReport> {
    let board = position.board();
    let scores = score_sides(position);
    let bombarded = bombarded_squares(board);

    let threatened_by = |red: bool| -> Vec<Coordinate> {
        Coordinate::all()
            .filter(|c| bombarded.get(c).map_or(false, |b| if red { b.red } else { b.blue }))
            .collect()
    };

    let game_over = terminal_state(position, &clock.time_control()).context("Cannot decide the game result")?;

    Ok(EvalReport {
        evaluation: scores.balance(),
        red_score: scores.red,
        blue_score: scores.blue,
        bombarded_by_red: threatened_by(true),
        bombarded_by_blue: threatened_by(false),
        engaged: engaged_pairs(board, None).into_iter().map(|p| (p.red, p.blue)).collect(),
        free_captures: free_infantry_captures(board, position.current_player())
            .into_iter()
            .map(|f| (f.attacker, f.target))
            .collect(),
        game_over,
    })
}

fn print_text(position: &Position, report: &EvalReport) {
    println!("{}", position.board());
    println!("\n{} to move, turn {}", position.current_player(), position.turn());
    println!("Evaluation:  {:+.2} (RED {:.2}, BLUE {:.2})", report.evaluation, report.red_score, report.blue_score);
    println!("RED fire:    {}", join_squares(&report.bombarded_by_red));
    println!("BLUE fire:   {}", join_squares(&report.bombarded_by_blue));
    println!("Engaged:     {}", join_pairs(&report.engaged, "-"));
    println!("Free takes:  {}", join_pairs(&report.free_captures, " x "));

    match &report.game_over {
        Some(over) => println!("Result:      {}", over),
        None => println!("Result:      in progress"),
    }
}

// ============================================================================
// LEVEL 3 - UTILITIES
// ============================================================================

fn join_squares(squares: &[Coordinate]) -> String {
    if squares.is_empty() {
        return "none".to_string();
    }
    squares.iter().map(|c| c.algebraic()).collect::<Vec<_>>().join(" ")
}

fn join_pairs(pairs: &[(Coordinate, Coordinate)], sep: &str) -> String {
    if pairs.is_empty() {
        return "none".to_string();
    }
    pairs
        .iter()
        .map(|(a, b)| format!("{}{}{}", a.algebraic(), sep, b.algebraic()))
        .collect::<Vec<_>>()
        .join(" ")
}
