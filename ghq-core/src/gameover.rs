//! Terminal-state detection

use serde::{Deserialize, Serialize};

use crate::board::Player;
use crate::error::{GhqError, Result};
use crate::game::Position;

/// Clock and replay settings supplied by the caller. The engine never reads
/// a wall clock; elapsed times are plain data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeControl {
    /// Budget per side in milliseconds; 0 disables the clock
    pub total_ms: u64,
    pub red_elapsed_ms: u64,
    pub blue_elapsed_ms: u64,
    /// Reviewing a finished game: never report a result
    pub replay: bool,
}

impl TimeControl {
    pub fn elapsed(&self, player: Player) -> u64 {
        match player {
            Player::Red => self.red_elapsed_ms,
            Player::Blue => self.blue_elapsed_ms,
        }
    }

    fn is_flagged(&self, player: Player) -> bool {
        self.total_ms > 0 && self.elapsed(player) > self.total_ms
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WinReason {
    OnTime,
    HqCapture,
}

impl std::fmt::Display for WinReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinReason::OnTime => write!(f, "on time"),
            WinReason::HqCapture => write!(f, "by HQ capture"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub winner: Player,
    pub reason: WinReason,
}

impl std::fmt::Display for GameOver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wins {}", self.winner, self.reason)
    }
}

/// Decide whether the game is over.
///
/// Clocks are checked before HQs, RED's before BLUE's. A board without
/// either HQ has no single winner and yields
/// [`GhqError::AmbiguousTerminalState`].
pub fn terminal_state(position: &Position, clock: &TimeControl) -> Result<Option<GameOver>> {
    if clock.replay {
        return Ok(None);
    }

    for player in [Player::Red, Player::Blue] {
        if clock.is_flagged(player) {
            return Ok(Some(GameOver { winner: player.opponent(), reason: WinReason::OnTime }));
        }
    }

    let board = position.board();
    match (board.is_hq_on_board(Player::Red), board.is_hq_on_board(Player::Blue)) {
        (true, true) => Ok(None),
        (false, false) => Err(GhqError::AmbiguousTerminalState),
        (false, true) => Ok(Some(GameOver { winner: Player::Blue, reason: WinReason::HqCapture })),
        (true, false) => Ok(Some(GameOver { winner: Player::Red, reason: WinReason::HqCapture })),
    }
}
