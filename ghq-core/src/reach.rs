//! Where units can go: movement destinations and reinforcement squares

use crate::board::{Board, Coordinate, Orientation, Player, BOARD_SIZE};
use crate::bombard::{bombarded_squares, is_bombarded, Bombardment};

/// Destinations for the piece on `from`, in discovery order.
///
/// Units move in a straight line along any of the eight compass directions,
/// up to their mobility. A ray ends at the board edge, before any occupied
/// square and before any square the opponent bombards. An airborne unit on
/// its own back rank may also drop onto any empty square the opponent does
/// not bombard.
pub fn destinations_for(from: Coordinate, board: &Board) -> Vec<Coordinate> {
    let bombarded = bombarded_squares(board);
    destinations_with(from, board, &bombarded)
}

/// [`destinations_for`] with a precomputed bombardment map
pub fn destinations_with(from: Coordinate, board: &Board, bombarded: &Bombardment) -> Vec<Coordinate> {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return vec![],
    };
    let enemy = piece.player.opponent();
    let mut destinations = Vec::new();

    if piece.kind.can_parachute() && from.row() == piece.player.home_row() {
        for to in Coordinate::all() {
            if board.is_empty(to) && !is_bombarded(bombarded, to, enemy) {
                destinations.push(to);
            }
        }
        return destinations;
    }

    for orientation in Orientation::ALL {
        let (dr, dc) = orientation.vector();
        let mut current = from;

        for _ in 0..piece.kind.mobility() {
            current = match current.offset(dr, dc) {
                Some(c) => c,
                None => break,
            };

            if !board.is_empty(current) || is_bombarded(bombarded, current, enemy) {
                break; // Blocked
            }

            destinations.push(current);
        }
    }

    destinations
}

/// Empty back-rank squares not bombarded by the opponent
pub fn reinforcement_squares_for(board: &Board, player: Player) -> Vec<Coordinate> {
    let bombarded = bombarded_squares(board);
    reinforcement_squares_with(board, player, &bombarded)
}

/// [`reinforcement_squares_for`] with a precomputed bombardment map
pub fn reinforcement_squares_with(board: &Board, player: Player, bombarded: &Bombardment) -> Vec<Coordinate> {
    let row = player.home_row();
    (0..BOARD_SIZE)
        .map(|col| Coordinate::new(row, col))
        .filter(|&c| board.is_empty(c) && !is_bombarded(bombarded, c, player.opponent()))
        .collect()
}
