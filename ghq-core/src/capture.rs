//! Capture resolution: infantry engagement, capture candidates and
//! bombardment removals

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{Board, Coordinate, Piece, Player};
use crate::bombard::bombarded_squares;

/// A RED and a BLUE infantry locked together by the engagement matching
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EngagedPair {
    pub red: Coordinate,
    pub blue: Coordinate,
}

/// A capture an unengaged infantry could make without spending an action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreeCapture {
    pub attacker: Coordinate,
    pub target: Coordinate,
    pub captured: Piece,
}

// ============================================================================
// ENGAGEMENT
// ============================================================================

/// Maximum matching between orthogonally adjacent RED and BLUE infantry.
///
/// The piece on `exclude` is treated as absent. Pieces are discovered in
/// row-major order and each RED infantry takes the first augmenting path
/// found, so the result is fully determined by the board. Pairs are returned
/// in BLUE discovery order.
pub fn engaged_pairs(board: &Board, exclude: Option<Coordinate>) -> Vec<EngagedPair> {
    let mut reds = Vec::new();
    let mut blues = Vec::new();
    let mut blue_index: FxHashMap<Coordinate, usize> = FxHashMap::default();

    for (at, piece) in board.pieces() {
        if Some(at) == exclude || !piece.is_infantry() {
            continue;
        }
        match piece.player {
            Player::Red => reds.push(at),
            Player::Blue => {
                blue_index.insert(at, blues.len());
                blues.push(at);
            }
        }
    }

    let adjacency: Vec<Vec<usize>> = reds
        .iter()
        .map(|red| {
            red.orthogonal_neighbors()
                .filter_map(|n| blue_index.get(&n).copied())
                .collect()
        })
        .collect();

    let mut blue_match: Vec<Option<usize>> = vec![None; blues.len()];
    for red in 0..reds.len() {
        let mut seen = vec![false; blues.len()];
        augment(red, &adjacency, &mut blue_match, &mut seen);
    }

    blue_match
        .iter()
        .enumerate()
        .filter_map(|(blue, red)| {
            red.map(|r| EngagedPair {
                red: reds[r],
                blue: blues[blue],
            })
        })
        .collect()
}

/// Look for an augmenting path from `root` (Kuhn's algorithm), walking the
/// same edges in the same order as the recursive formulation but on an
/// explicit stack.
fn augment(
    root: usize,
    adjacency: &[Vec<usize>],
    blue_match: &mut [Option<usize>],
    seen: &mut [bool],
) -> bool {
    // (red, next edge to try)
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
    // via[i] is the blue that links stack[i] to stack[i + 1]
    let mut via: Vec<usize> = Vec::new();

    while let Some(frame) = stack.last_mut() {
        let (red, edge) = *frame;
        if edge >= adjacency[red].len() {
            stack.pop();
            via.pop();
            continue;
        }
        frame.1 += 1;

        let blue = adjacency[red][edge];
        if seen[blue] {
            continue;
        }
        seen[blue] = true;
        via.push(blue);

        match blue_match[blue] {
            Some(rival) => stack.push((rival, 0)),
            None => {
                for (&(r, _), &b) in stack.iter().zip(via.iter()) {
                    blue_match[b] = Some(r);
                }
                return true;
            }
        }
    }

    false
}

/// Squares of every engaged infantry
pub fn engaged_squares(pairs: &[EngagedPair]) -> FxHashSet<Coordinate> {
    pairs.iter().flat_map(|p| [p.red, p.blue]).collect()
}

// ============================================================================
// CAPTURE CANDIDATES
// ============================================================================

/// Enemies the capturing unit standing on `attacker_at` may take.
///
/// Engagement is computed with the attacker absent. An attacker next to an
/// unengaged enemy infantry must engage it and captures nothing; otherwise
/// every adjacent engaged enemy infantry and every adjacent enemy
/// non-infantry unit is a candidate.
pub fn capture_candidates(attacker_at: Coordinate, board: &Board) -> Vec<Coordinate> {
    let attacker = match board.get(attacker_at) {
        Some(p) if p.kind.can_capture() => p,
        _ => return vec![],
    };

    let engaged = engaged_squares(&engaged_pairs(board, Some(attacker_at)));

    let adjacent_enemies: Vec<(Coordinate, Piece)> = attacker_at
        .orthogonal_neighbors()
        .filter_map(|c| board.get(c).map(|p| (c, p)))
        .filter(|(_, p)| p.player != attacker.player)
        .collect();

    let must_engage = adjacent_enemies
        .iter()
        .any(|(c, p)| p.is_infantry() && !engaged.contains(c));
    if must_engage {
        return vec![];
    }

    adjacent_enemies
        .into_iter()
        .filter(|(c, p)| !p.is_infantry() || engaged.contains(c))
        .map(|(c, _)| c)
        .collect()
}

/// Capture candidates for the unit on `from` once it has moved to `to`
pub fn capture_candidates_after_move(board: &Board, from: Coordinate, to: Coordinate) -> Vec<Coordinate> {
    let piece = match board.get(from) {
        Some(p) if p.kind.can_capture() => p,
        _ => return vec![],
    };

    let mut moved = *board;
    moved.remove(from);
    moved.place(to, piece);
    capture_candidates(to, &moved)
}

/// Captures `player`'s unengaged infantry could make where they stand.
///
/// Each attacker and each target appears at most once; attackers are
/// visited in row-major order and take their first unclaimed candidate.
pub fn free_infantry_captures(board: &Board, player: Player) -> Vec<FreeCapture> {
    let engaged = engaged_squares(&engaged_pairs(board, None));
    let mut claimed: FxHashSet<Coordinate> = FxHashSet::default();
    let mut captures = Vec::new();

    for (attacker, piece) in board.pieces_of(player) {
        if !piece.is_infantry() || engaged.contains(&attacker) {
            continue;
        }

        let target = capture_candidates(attacker, board)
            .into_iter()
            .find(|c| !claimed.contains(c));

        if let Some(target) = target {
            if let Some(captured) = board.get(target) {
                claimed.insert(target);
                captures.push(FreeCapture {
                    attacker,
                    target,
                    captured,
                });
            }
        }
    }

    captures
}

// ============================================================================
// BOMBARDMENT REMOVAL
// ============================================================================

/// Remove every opposing unit standing on a square `player` bombards.
///
/// Returns the removed units in row-major order.
pub fn clear_bombarded_squares(board: &mut Board, player: Player) -> Vec<(Coordinate, Piece)> {
    let bombarded = bombarded_squares(board);
    let mut removed = Vec::new();

    for at in Coordinate::all() {
        let hit = bombarded.get(&at).map_or(false, |b| b.by(player));
        if !hit {
            continue;
        }
        if let Some(piece) = board.get(at) {
            if piece.player != player {
                board.remove(at);
                tracing::trace!(square = %at, kind = %piece.kind, "bombardment removed unit");
                removed.push((at, piece));
            }
        }
    }

    removed
}
