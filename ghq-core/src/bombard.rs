//! Artillery bombardment: squares threatened by directional units

use rustc_hash::FxHashMap;

use crate::board::{Board, Coordinate, Orientation, Player};

/// Which sides threaten a square
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BombardedBy {
    pub red: bool,
    pub blue: bool,
}

impl BombardedBy {
    pub fn by(&self, player: Player) -> bool {
        match player {
            Player::Red => self.red,
            Player::Blue => self.blue,
        }
    }

    fn mark(&mut self, player: Player) {
        match player {
            Player::Red => self.red = true,
            Player::Blue => self.blue = true,
        }
    }
}

/// Threatened squares; coordinates threatened by nobody are absent
pub type Bombardment = FxHashMap<Coordinate, BombardedBy>;

/// Squares hit by a unit of `range` standing on `origin` facing `orientation`
pub fn ray(origin: Coordinate, orientation: Orientation, range: u8) -> impl Iterator<Item = Coordinate> {
    let (dr, dc) = orientation.vector();
    let mut current = Some(origin);
    (0..range).map_while(move |_| {
        current = current.and_then(|c| c.offset(dr, dc));
        current
    })
}

/// Compute every square threatened by either side
pub fn bombarded_squares(board: &Board) -> Bombardment {
    let mut bombarded = Bombardment::default();

    for (at, piece) in board.pieces() {
        let (Some(range), Some(orientation)) = (piece.kind.artillery_range(), piece.orientation) else {
            continue;
        };

        for target in ray(at, orientation, range) {
            bombarded.entry(target).or_default().mark(piece.player);
        }
    }

    bombarded
}

/// Whether the unit on `from`, relocated to `to` and facing `orientation`,
/// would threaten `target`.
///
/// Returns false when `from` is empty or holds a non-directional unit.
pub fn is_bombarded_by(
    board: &Board,
    from: Coordinate,
    to: Coordinate,
    orientation: Orientation,
    target: Coordinate,
) -> bool {
    let range = match board.get(from).and_then(|p| p.kind.artillery_range()) {
        Some(r) => r,
        None => return false,
    };

    ray(to, orientation, range).any(|c| c == target)
}

/// Whether `at` is threatened by `player`
pub fn is_bombarded(bombarded: &Bombardment, at: Coordinate, player: Player) -> bool {
    bombarded.get(&at).map_or(false, |b| b.by(player))
}
