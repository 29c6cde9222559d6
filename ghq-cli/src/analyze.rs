//! Analyze command - evaluate every allowed action in parallel
//!
//! Each candidate is applied to its own copy of the position, so the
//! candidates are scored on the rayon pool without any shared state.

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;

use ghq_core::{evaluate, Action, Player, Position};

use crate::common::PositionArgs;

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// How many candidates to show
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Print squares as a1..h8 instead of row,col
    #[arg(long)]
    pub algebraic: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One scored candidate
#[derive(Clone, Debug, Serialize)]
pub struct Candidate {
    pub action: Action,
    /// Evaluation after the action, RED positive
    pub evaluation: f32,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let position = args.position.load()?;
    let baseline = evaluate(&position);

    tracing::info!("Analyzing {} to move (baseline {:+.2})", position.current_player(), baseline);

    let mut candidates = rank_actions(&position)?;
    candidates.truncate(args.top);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else {
        println!("{} to move, baseline {:+.2}\n", position.current_player(), baseline);
        for (rank, c) in candidates.iter().enumerate() {
            let name = if args.algebraic { c.action.algebraic() } else { c.action.notation() };
            println!("{:>3}. {:<32} {:+.2}", rank + 1, name, c.evaluation);
        }
    }

    Ok(())
}

/// Score every allowed action, best first for the side to move.
///
/// Ties keep generation order.
pub fn rank_actions(position: &Position) -> Result<Vec<Candidate>> {
    let mover = position.current_player();

    let mut candidates = position
        .allowed_moves()
        .into_par_iter()
        .map(|action| -> Result<Candidate> {
            let next = position.apply(action)?;
            Ok(Candidate { action, evaluation: evaluate(&next) })
        })
        .collect::<Result<Vec<_>>>()?;

    candidates.sort_by(|a, b| {
        let (a, b) = (perspective(mover, a.evaluation), perspective(mover, b.evaluation));
        b.total_cmp(&a)
    });

    Ok(candidates)
}

/// Flip a RED-positive score so that larger is better for `player`
pub fn perspective(player: Player, evaluation: f32) -> f32 {
    match player {
        Player::Red => evaluation,
        Player::Blue => -evaluation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_covers_every_action() {
        let position = Position::initial();
        let ranked = rank_actions(&position).unwrap();
        assert_eq!(ranked.len(), position.allowed_moves().len());
    }

    #[test]
    fn test_rank_is_sorted_for_mover() {
        let position = Position::initial().apply(Action::Skip).unwrap();
        let ranked = rank_actions(&position).unwrap();
        // BLUE to move: lower evaluations first
        for pair in ranked.windows(2) {
            assert!(pair[0].evaluation <= pair[1].evaluation);
        }
    }

    #[test]
    fn test_rank_is_deterministic() {
        let position = Position::initial();
        let a: Vec<String> = rank_actions(&position).unwrap().iter().map(|c| c.action.notation()).collect();
        let b: Vec<String> = rank_actions(&position).unwrap().iter().map(|c| c.action.notation()).collect();
        assert_eq!(a, b);
    }
}
