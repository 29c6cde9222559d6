//! Position evaluation
//!
//! Positive scores favor RED, negative favor BLUE.

use serde::Serialize;

use crate::action::Action;
use crate::board::{Coordinate, Piece, Player, BOARD_SIZE};
use crate::bombard::bombarded_squares;
use crate::capture::free_infantry_captures;
use crate::game::Position;
use crate::units::UnitKind;

/// Square bonus by ring, rim first
const POSITION_GRADIENT: [f32; 4] = [-0.25, -0.15, 0.0, 0.25];

/// Bonus for threatening a square, by ring
const BOMBARD_GRADIENT: [f32; 4] = [-0.1, 0.0, 0.05, 0.1];

/// Airborne infantry loses this much per row away from its back rank
const AIRBORNE_DECAY: f32 = 0.7;

/// Share of a unit's value transferred when the enemy bombards it
const BOMBARD_THREAT_SHARE: f32 = 0.5;

/// Running totals for each side
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Scores {
    pub red: f32,
    pub blue: f32,
}

impl Scores {
    fn add(&mut self, player: Player, value: f32) {
        match player {
            Player::Red => self.red += value,
            Player::Blue => self.blue += value,
        }
    }

    fn transfer(&mut self, to: Player, value: f32) {
        self.add(to, value);
        self.add(to.opponent(), -value);
    }

    /// RED minus BLUE, rounded to two decimals
    pub fn balance(&self) -> f32 {
        (100.0 * (self.red - self.blue)).round() / 100.0
    }
}

/// Distance from the nearest edge: 0 on the rim, 3 in the centre
fn ring(at: Coordinate) -> usize {
    let far = BOARD_SIZE - 1;
    at.row().min(at.col()).min(far - at.row()).min(far - at.col()) as usize
}

/// Material plus placement for the unit on `at`
fn placed_value(at: Coordinate, piece: Piece) -> f32 {
    match piece.kind {
        UnitKind::AirborneInfantry => {
            let distance = (at.row() as f32 - piece.player.home_row() as f32).abs();
            piece.kind.value() - AIRBORNE_DECAY * distance
        }
        kind => kind.value() + POSITION_GRADIENT[ring(at)],
    }
}

/// Per-side scores behind [`evaluate`]
pub fn score_sides(position: &Position) -> Scores {
    let board = position.board();
    let mut scores = Scores::default();

    // Captures the side to move could make this turn
    for action in position.allowed_moves() {
        let Action::Move { from, capture: Some(target), .. } = action else {
            continue;
        };
        if let (Some(attacker), Some(captured)) = (board.get(from), board.get(target)) {
            scores.transfer(attacker.player, captured.kind.value());
        }
    }

    for free in free_infantry_captures(board, position.current_player()) {
        scores.transfer(free.captured.player.opponent(), free.captured.kind.value());
    }

    let bombarded = bombarded_squares(board);

    for (at, piece) in board.pieces() {
        let value = placed_value(at, piece);
        scores.add(piece.player, value);

        let Some(threat) = bombarded.get(&at) else {
            continue;
        };

        for side in [Player::Red, Player::Blue] {
            if threat.by(side) {
                scores.add(side, BOMBARD_GRADIENT[ring(at)]);
            }
        }

        let enemy = piece.player.opponent();
        if threat.by(enemy) {
            scores.transfer(enemy, value * BOMBARD_THREAT_SHARE);
        }
    }

    scores
}

/// Evaluate a position from RED's point of view
pub fn evaluate(position: &Position) -> f32 {
    score_sides(position).balance()
}
