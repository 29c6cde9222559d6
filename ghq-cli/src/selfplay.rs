//! Selfplay command - play games between simple drivers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), choose_action(), compute_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use ghq_core::{evaluate, terminal_state, Action, GameOver, Player, Position, TimeControl};

use crate::analyze::perspective;
use crate::common::create_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// How a side picks its actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// Uniformly random allowed action
    Random,
    /// Best evaluation after one action, random among ties
    Greedy,
}

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Stop a game once this many turns have been played
    #[arg(long, default_value = "100")]
    pub max_turns: u32,

    /// Driver for RED
    #[arg(long, value_enum, default_value = "greedy")]
    pub red: Driver,

    /// Driver for BLUE
    #[arg(long, value_enum, default_value = "random")]
    pub blue: Driver,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Settings for a single game
#[derive(Clone, Copy, Debug)]
pub struct PlayConfig {
    pub max_turns: u32,
    pub red: Driver,
    pub blue: Driver,
}

impl PlayConfig {
    fn driver(&self, player: Player) -> Driver {
        match player {
            Player::Red => self.red,
            Player::Blue => self.blue,
        }
    }
}

/// How a game stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Win(GameOver),
    TurnLimit,
    /// Both HQs left the board together
    Ambiguous,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    outcome: Outcome,
    turns: u32,
    actions: Vec<Action>,
    final_evaluation: f32,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct SelfplayResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    blue_wins: usize,
    unfinished: usize,
    avg_turns: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
///
/// 1. Derive a seed per game from the base seed
/// 2. Play the games in parallel
/// 3. Report results
pub fn run(args: SelfplayArgs, seed: Option<u64>) -> Result<()> {
    let config = PlayConfig { max_turns: args.max_turns, red: args.red, blue: args.blue };
    let base_seed: u64 = create_rng(seed).gen();

    tracing::info!(
        "Starting selfplay: {:?} vs {:?} ({} games, max {} turns, seed {})",
        config.red,
        config.blue,
        args.games,
        config.max_turns,
        base_seed
    );

    let results = play_games(&config, args.games, base_seed)?;

    report_results(&config, &results, args.json);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play every game on the rayon pool; each game owns its position and RNG
fn play_games(config: &PlayConfig, games: usize, base_seed: u64) -> Result<SelfplayResults> {
    let records = (0..games)
        .into_par_iter()
        .map(|i| play_single_game(i + 1, base_seed.wrapping_add(i as u64), config))
        .collect::<Result<Vec<_>>>()?;

    for record in &records {
        tracing::info!(
            "Game {}: {} ({} turns, {} actions)",
            record.game_number,
            describe(&record.outcome),
            record.turns,
            record.actions.len()
        );
    }

    Ok(compute_statistics(records))
}

/// Report results
fn report_results(config: &PlayConfig, results: &SelfplayResults, json: bool) {
    if json {
        print_json_results(config, results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game from the opening
fn play_single_game(game_number: usize, seed: u64, config: &PlayConfig) -> Result<GameRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut position = Position::initial();
    let mut actions = Vec::new();
    let clock = TimeControl::default();

    let outcome = loop {
        match terminal_state(&position, &clock) {
            Ok(Some(over)) => break Outcome::Win(over),
            Ok(None) => {}
            Err(_) => break Outcome::Ambiguous,
        }
        if position.turn() > config.max_turns {
            break Outcome::TurnLimit;
        }

        let action = choose_action(&position, config.driver(position.current_player()), &mut rng)?;
        position = position
            .apply(action)
            .with_context(|| format!("Game {}: driver chose {}", game_number, action))?;
        actions.push(action);
    };

    Ok(GameRecord {
        game_number,
        seed,
        outcome,
        turns: position.turn(),
        actions,
        final_evaluation: evaluate(&position),
    })
}

/// Pick the next action for the side to move
fn choose_action(position: &Position, driver: Driver, rng: &mut ChaCha8Rng) -> Result<Action> {
    let moves = position.allowed_moves();

    let pool = match driver {
        Driver::Random => moves,
        Driver::Greedy => best_actions(position, &moves)?,
    };

    Ok(pool.choose(rng).copied().unwrap_or(Action::Skip))
}

/// Actions whose resulting evaluation is best for the mover
fn best_actions(position: &Position, moves: &[Action]) -> Result<Vec<Action>> {
    const EPSILON: f32 = 1e-4;
    let mover = position.current_player();
    let mut best = f32::NEG_INFINITY;
    let mut best_actions = Vec::new();

    for &action in moves {
        let score = perspective(mover, evaluate(&position.apply(action)?));
        if score > best + EPSILON {
            best = score;
            best_actions.clear();
            best_actions.push(action);
        } else if (score - best).abs() <= EPSILON {
            best_actions.push(action);
        }
    }

    Ok(best_actions)
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> SelfplayResults {
    let wins_for = |player: Player| {
        games
            .iter()
            .filter(|g| matches!(g.outcome, Outcome::Win(over) if over.winner == player))
            .count()
    };
    let red_wins = wins_for(Player::Red);
    let blue_wins = wins_for(Player::Blue);
    let unfinished = games.len() - red_wins - blue_wins;

    let total_turns: u32 = games.iter().map(|g| g.turns).sum();
    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f32 / games.len() as f32
    };

    SelfplayResults { games, red_wins, blue_wins, unfinished, avg_turns }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Win(over) => over.to_string(),
        Outcome::TurnLimit => "turn limit".to_string(),
        Outcome::Ambiguous => "both HQs lost".to_string(),
    }
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(config: &PlayConfig, results: &SelfplayResults) {
    #[derive(Serialize)]
    struct JsonGame {
        game_number: usize,
        seed: u64,
        result: String,
        winner: Option<Player>,
        turns: u32,
        actions: Vec<String>,
        final_evaluation: f32,
    }

    #[derive(Serialize)]
    struct JsonOutput {
        red: Driver,
        blue: Driver,
        total_games: usize,
        red_wins: usize,
        blue_wins: usize,
        unfinished: usize,
        avg_turns: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        red: config.red,
        blue: config.blue,
        total_games: results.games.len(),
        red_wins: results.red_wins,
        blue_wins: results.blue_wins,
        unfinished: results.unfinished,
        avg_turns: results.avg_turns,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                seed: g.seed,
                result: describe(&g.outcome),
                winner: match g.outcome {
                    Outcome::Win(over) => Some(over.winner),
                    _ => None,
                },
                turns: g.turns,
                actions: g.actions.iter().map(Action::notation).collect(),
                final_evaluation: g.final_evaluation,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &SelfplayResults) {
    let total = results.games.len();

    println!("\n=== Selfplay Results ===");
    println!("Total games: {}", total);
    println!("RED wins:    {} ({:.1}%)", results.red_wins, percent(results.red_wins, total));
    println!("BLUE wins:   {} ({:.1}%)", results.blue_wins, percent(results.blue_wins, total));
    println!("Unfinished:  {} ({:.1}%)", results.unfinished, percent(results.unfinished, total));
    println!("Avg turns:   {:.1}", results.avg_turns);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} after {} turns (eval {:+.2})",
            game.game_number,
            describe(&game.outcome),
            game.turns,
            game.final_evaluation
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ghq_core::WinReason;

    fn record(game_number: usize, outcome: Outcome, turns: u32) -> GameRecord {
        GameRecord { game_number, seed: 0, outcome, turns, actions: vec![], final_evaluation: 0.0 }
    }

    #[test]
    fn test_compute_statistics_empty() {
        let results = compute_statistics(vec![]);
        assert_eq!(results.red_wins, 0);
        assert_eq!(results.blue_wins, 0);
        assert_eq!(results.unfinished, 0);
        assert_eq!(results.avg_turns, 0.0);
    }

    #[test]
    fn test_compute_statistics() {
        let red = Outcome::Win(GameOver { winner: Player::Red, reason: WinReason::HqCapture });
        let blue = Outcome::Win(GameOver { winner: Player::Blue, reason: WinReason::OnTime });
        let results = compute_statistics(vec![
            record(1, red, 10),
            record(2, blue, 20),
            record(3, Outcome::TurnLimit, 30),
            record(4, red, 20),
        ]);
        assert_eq!(results.red_wins, 2);
        assert_eq!(results.blue_wins, 1);
        assert_eq!(results.unfinished, 1);
        assert_eq!(results.avg_turns, 20.0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = PlayConfig { max_turns: 4, red: Driver::Random, blue: Driver::Random };
        let a = play_single_game(1, 7, &config).unwrap();
        let b = play_single_game(1, 7, &config).unwrap();
        assert_eq!(a.actions, b.actions);
        assert_eq!(a.outcome, b.outcome);
    }

    #[test]
    fn test_turn_limit_stops_game() {
        let config = PlayConfig { max_turns: 2, red: Driver::Greedy, blue: Driver::Random };
        let game = play_single_game(1, 3, &config).unwrap();
        assert!(game.turns <= 3);
        assert!(game.actions.len() <= 6);
    }

    #[test]
    fn test_greedy_prefers_best_evaluation() {
        let position = Position::initial();
        let moves = position.allowed_moves();
        let best = best_actions(&position, &moves).unwrap();
        assert!(!best.is_empty());

        let top = perspective(Player::Red, evaluate(&position.apply(best[0]).unwrap()));
        for &action in &moves {
            let score = perspective(Player::Red, evaluate(&position.apply(action).unwrap()));
            assert!(score <= top + 1e-4);
        }
    }

    #[test]
    fn test_play_games_in_parallel_is_reproducible() {
        let config = PlayConfig { max_turns: 3, red: Driver::Random, blue: Driver::Random };
        let a = play_games(&config, 4, 11).unwrap();
        let b = play_games(&config, 4, 11).unwrap();
        let actions = |r: &SelfplayResults| r.games.iter().map(|g| g.actions.clone()).collect::<Vec<_>>();
        assert_eq!(actions(&a), actions(&b));
        assert_eq!(a.games.len(), 4);
    }
}
