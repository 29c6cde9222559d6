//! Moves command - list the allowed actions of a position

use anyhow::Result;
use clap::Args;

use ghq_core::{Action, Position};

use crate::common::PositionArgs;

#[derive(Args)]
pub struct MovesArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Print squares as a1..h8 instead of row,col
    #[arg(long)]
    pub algebraic: bool,

    /// Output the actions as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: MovesArgs) -> Result<()> {
    let position = args.position.load()?;
    let moves = position.allowed_moves();

    tracing::info!("{} allowed actions for {}", moves.len(), position.current_player());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&moves)?);
    } else {
        print_text(&position, &moves, args.algebraic);
    }

    Ok(())
}

fn print_text(position: &Position, moves: &[Action], algebraic: bool) {
    println!("{}", position.board());
    println!(
        "\n{} to move, turn {}, {} action(s) left\n",
        position.current_player(),
        position.turn(),
        position.actions_remaining()
    );

    for action in moves {
        if algebraic {
            println!("{}", action.algebraic());
        } else {
            println!("{}", action);
        }
    }
}
