//! Arguments and helpers shared by the subcommands

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ghq_core::{Position, Setup, TimeControl, Tutorial};

/// Where to read the position from
#[derive(Args, Clone, Debug, Default)]
pub struct PositionArgs {
    /// Setup JSON file (board, reserves, side to move, actions so far this
    /// turn); defaults to the opening
    #[arg(long, value_name = "FILE", conflicts_with = "tutorial")]
    pub position: Option<PathBuf>,

    /// Start from a named tutorial or puzzle board (see `ghq tutorials`)
    #[arg(long, value_name = "NAME")]
    pub tutorial: Option<String>,
}

impl PositionArgs {
    pub fn load(&self) -> Result<Position> {
        if let Some(name) = &self.tutorial {
            return load_tutorial(name);
        }
        let Some(path) = &self.position else {
            return Ok(Position::initial());
        };

        let setup = Setup::load(path).with_context(|| format!("Failed to load position: {}", path.display()))?;
        let position = setup
            .to_position()
            .with_context(|| format!("Invalid position in {}", path.display()))?;

        tracing::debug!("Loaded position from {} ({} to move)", path.display(), position.current_player());
        Ok(position)
    }
}

fn load_tutorial(name: &str) -> Result<Position> {
    let Some(tutorial) = Tutorial::find(name) else {
        bail!("Unknown tutorial '{}'; `ghq tutorials` lists the boards", name);
    };
    let position = tutorial
        .setup()
        .and_then(|setup| setup.to_position())
        .with_context(|| format!("Invalid tutorial board: {}", tutorial.name))?;

    tracing::debug!("Loaded tutorial {} ({})", tutorial.name, tutorial.category);
    Ok(position)
}

/// Clock state for terminal detection
#[derive(Args, Clone, Debug, Default)]
pub struct ClockArgs {
    /// Time budget per side in milliseconds (0 = no clock)
    #[arg(long, default_value = "0")]
    pub time_control: u64,

    /// Milliseconds RED has used
    #[arg(long, default_value = "0")]
    pub red_elapsed: u64,

    /// Milliseconds BLUE has used
    #[arg(long, default_value = "0")]
    pub blue_elapsed: u64,
}

impl ClockArgs {
    pub fn time_control(&self) -> TimeControl {
        TimeControl {
            total_ms: self.time_control,
            red_elapsed_ms: self.red_elapsed,
            blue_elapsed_ms: self.blue_elapsed,
            replay: false,
        }
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghq_core::Player;

    #[test]
    fn test_default_position_is_opening() {
        let position = PositionArgs::default().load().unwrap();
        assert_eq!(position, Position::initial());
        assert_eq!(position.current_player(), Player::Red);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let args = PositionArgs { position: Some(PathBuf::from("/nonexistent/setup.json")), tutorial: None };
        let err = args.load().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/setup.json"));
    }

    #[test]
    fn test_tutorial_by_name() {
        let args = PositionArgs { position: None, tutorial: Some("infantry capture hq".to_string()) };
        let position = args.load().unwrap();
        assert_eq!(position.board().pieces().count(), 4);

        let args = PositionArgs { position: None, tutorial: Some("No such board".to_string()) };
        assert!(args.load().unwrap_err().to_string().contains("Unknown tutorial"));
    }

    #[test]
    fn test_create_rng_deterministic() {
        use rand::Rng;
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }
}
