//! Tutorials command - list the named boards

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use ghq_core::{Category, Tutorial, TUTORIALS};

#[derive(Args)]
pub struct TutorialsArgs {
    /// Print each board diagram under its name
    #[arg(long)]
    pub boards: bool,

    /// Output the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Entry {
    name: &'static str,
    category: Category,
}

pub fn run(args: TutorialsArgs) -> Result<()> {
    if args.json {
        let entries: Vec<Entry> = TUTORIALS.iter().map(|t| Entry { name: t.name, category: t.category }).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for category in [Category::Capturing, Category::Puzzles, Category::Endgames] {
        println!("{}:", category);
        for tutorial in TUTORIALS.iter().filter(|t| t.category == category) {
            print_entry(tutorial, args.boards)?;
        }
    }

    Ok(())
}

fn print_entry(tutorial: &Tutorial, with_board: bool) -> Result<()> {
    println!("  {}", tutorial.name);
    if with_board {
        println!("{}\n", tutorial.board()?);
    }
    Ok(())
}
