//! Board geometry: coordinates, orientations, pieces and the 8x8 grid

use serde::{Deserialize, Serialize};

use crate::error::{GhqError, Result};
use crate::units::UnitKind;

/// Board side length
pub const BOARD_SIZE: u8 = 8;

/// Orthogonal neighbour offsets (row, col): up, down, left, right
pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// ============================================================================
// PLAYER
// ============================================================================

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Player {
    Red = 0,
    Blue = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Back rank: reinforcements enter here, paratroopers drop from here
    pub fn home_row(self) -> u8 {
        match self {
            Player::Red => BOARD_SIZE - 1,
            Player::Blue => 0,
        }
    }

    /// Facing pointing away from the player's own back rank
    pub fn default_orientation(self) -> Orientation {
        match self {
            Player::Red => Orientation::North,
            Player::Blue => Orientation::South,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Red => f.write_str("RED"),
            Player::Blue => f.write_str("BLUE"),
        }
    }
}

// ============================================================================
// COORDINATE
// ============================================================================

/// A (row, col) square, both in [0, 7]. Row 0 is BLUE's back rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    /// Build a coordinate from trusted literals.
    ///
    /// Panics if either component is off the board; use [`Coordinate::try_new`]
    /// for caller-supplied values.
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE, "coordinate off the board");
        Self { row, col }
    }

    pub fn try_new(row: i32, col: i32) -> Result<Self> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Ok(Self { row: row as u8, col: col as u8 })
        } else {
            Err(GhqError::MalformedPosition(format!(
                "coordinate {},{} is off the board",
                row, col
            )))
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Step by (dr, dc); `None` once the step leaves the board
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Coordinate> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Coordinate { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// On-board orthogonal neighbours in up, down, left, right order
    pub fn orthogonal_neighbors(&self) -> impl Iterator<Item = Coordinate> + '_ {
        ORTHOGONAL.iter().filter_map(move |&(dr, dc)| self.offset(dr, dc))
    }

    /// Every square in row-major order
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coordinate { row, col }))
    }

    /// Human-readable square name: file `a`-`h` by column, rank `8`-`1` by row
    pub fn algebraic(&self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = BOARD_SIZE - self.row;
        format!("{}{}", file, rank)
    }
}

impl TryFrom<[u8; 2]> for Coordinate {
    type Error = GhqError;

    fn try_from(value: [u8; 2]) -> Result<Self> {
        Coordinate::try_new(value[0] as i32, value[1] as i32)
    }
}

impl From<Coordinate> for [u8; 2] {
    fn from(c: Coordinate) -> Self {
        [c.row, c.col]
    }
}

/// Canonical notation form: `row,col`
impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

// ============================================================================
// ORIENTATION
// ============================================================================

/// Facing of a directional unit, in 45 degree steps clockwise from "up"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Orientation {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::North,
        Orientation::NorthEast,
        Orientation::East,
        Orientation::SouthEast,
        Orientation::South,
        Orientation::SouthWest,
        Orientation::West,
        Orientation::NorthWest,
    ];

    pub fn degrees(self) -> u16 {
        self as u16 * 45
    }

    pub fn from_degrees(degrees: u16) -> Option<Orientation> {
        if degrees % 45 != 0 {
            return None;
        }
        Self::ALL.get((degrees / 45) as usize).copied()
    }

    /// Unit step (dr, dc) along this facing
    pub fn vector(self) -> (i8, i8) {
        match self {
            Orientation::North => (-1, 0),
            Orientation::NorthEast => (-1, 1),
            Orientation::East => (0, 1),
            Orientation::SouthEast => (1, 1),
            Orientation::South => (1, 0),
            Orientation::SouthWest => (1, -1),
            Orientation::West => (0, -1),
            Orientation::NorthWest => (-1, -1),
        }
    }
}

impl TryFrom<u16> for Orientation {
    type Error = GhqError;

    fn try_from(degrees: u16) -> Result<Self> {
        Orientation::from_degrees(degrees).ok_or_else(|| {
            GhqError::MalformedPosition(format!("{} is not a valid orientation", degrees))
        })
    }
}

impl From<Orientation> for u16 {
    fn from(o: Orientation) -> Self {
        o.degrees()
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

// ============================================================================
// PIECE
// ============================================================================

/// An occupant of a square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: UnitKind,
    pub player: Player,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

impl Piece {
    /// New unit; directional units face away from their own back rank
    pub fn new(kind: UnitKind, player: Player) -> Self {
        let orientation = kind.is_directional().then(|| player.default_orientation());
        Self { kind, player, orientation }
    }

    /// New directional unit with an explicit facing
    pub fn facing(kind: UnitKind, player: Player, orientation: Orientation) -> Self {
        Self { kind, player, orientation: Some(orientation) }
    }

    pub fn is_directional(&self) -> bool {
        self.kind.is_directional()
    }

    pub fn is_infantry(&self) -> bool {
        self.kind.is_infantry()
    }

    /// Directional units carry an orientation, everything else does not
    pub fn is_well_formed(&self) -> bool {
        self.is_directional() == self.orientation.is_some()
    }

    /// Inverse of the diagram symbol, with the default facing
    pub fn from_symbol(symbol: char) -> Option<Piece> {
        let kind = match symbol.to_ascii_lowercase() {
            'q' => UnitKind::Hq,
            'i' => UnitKind::Infantry,
            'f' => UnitKind::ArmoredInfantry,
            'p' => UnitKind::AirborneInfantry,
            'r' => UnitKind::Artillery,
            't' => UnitKind::ArmoredArtillery,
            'h' => UnitKind::HeavyArtillery,
            _ => return None,
        };
        let player = if symbol.is_ascii_uppercase() { Player::Red } else { Player::Blue };
        Some(Piece::new(kind, player))
    }

    fn symbol(&self) -> char {
        let c = match self.kind {
            UnitKind::Hq => 'q',
            UnitKind::Infantry => 'i',
            UnitKind::ArmoredInfantry => 'f',
            UnitKind::AirborneInfantry => 'p',
            UnitKind::Artillery => 'r',
            UnitKind::ArmoredArtillery => 't',
            UnitKind::HeavyArtillery => 'h',
        };
        match self.player {
            Player::Red => c.to_ascii_uppercase(),
            Player::Blue => c,
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// 8x8 grid addressed by [`Coordinate`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse eight diagram rows, row 0 first, `.` for empty squares
    pub fn from_rows(rows: &[&str; BOARD_SIZE as usize]) -> Result<Self> {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != BOARD_SIZE as usize {
                return Err(GhqError::MalformedPosition(format!("row {} is not {} squares wide", row, BOARD_SIZE)));
            }
            for (col, symbol) in line.chars().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let piece = Piece::from_symbol(symbol)
                    .ok_or_else(|| GhqError::MalformedPosition(format!("unknown unit symbol '{}'", symbol)))?;
                board.place(Coordinate::new(row as u8, col as u8), piece);
            }
        }
        Ok(board)
    }

    /// Standard opening layout
    pub fn standard() -> Self {
        let mut board = Self::empty();
        board.place(Coordinate::new(0, 0), Piece::new(UnitKind::Hq, Player::Blue));
        board.place(Coordinate::new(0, 1), Piece::new(UnitKind::Artillery, Player::Blue));
        for col in 0..3 {
            board.place(Coordinate::new(1, col), Piece::new(UnitKind::Infantry, Player::Blue));
        }
        for col in 5..8 {
            board.place(Coordinate::new(6, col), Piece::new(UnitKind::Infantry, Player::Red));
        }
        board.place(Coordinate::new(7, 6), Piece::new(UnitKind::Artillery, Player::Red));
        board.place(Coordinate::new(7, 7), Piece::new(UnitKind::Hq, Player::Red));
        board
    }

    pub fn get(&self, at: Coordinate) -> Option<Piece> {
        self.squares[at.row as usize][at.col as usize]
    }

    pub fn get_mut(&mut self, at: Coordinate) -> Option<&mut Piece> {
        self.squares[at.row as usize][at.col as usize].as_mut()
    }

    pub fn is_empty(&self, at: Coordinate) -> bool {
        self.get(at).is_none()
    }

    pub fn place(&mut self, at: Coordinate, piece: Piece) {
        self.squares[at.row as usize][at.col as usize] = Some(piece);
    }

    pub fn remove(&mut self, at: Coordinate) -> Option<Piece> {
        self.squares[at.row as usize][at.col as usize].take()
    }

    /// Occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        Coordinate::all().filter_map(move |c| self.get(c).map(|p| (c, p)))
    }

    /// A player's pieces in row-major order
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.player == player)
    }

    pub fn hq_count(&self, player: Player) -> usize {
        self.pieces_of(player)
            .filter(|(_, p)| p.kind == UnitKind::Hq)
            .count()
    }

    pub fn is_hq_on_board(&self, player: Player) -> bool {
        self.hq_count(player) > 0
    }
}

/// Text diagram, RED upper-case, BLUE lower-case, `.` for empty squares
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_SIZE {
            write!(f, "{} ", BOARD_SIZE - row)?;
            for col in 0..BOARD_SIZE {
                let c = self
                    .get(Coordinate::new(row, col))
                    .map(|p| p.symbol())
                    .unwrap_or('.');
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_rows() {
        let rows = ["q.......", "........", "........", "...i....", "...IH...", "........", "........", ".......Q"];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.pieces().count(), 5);
        let heavy = board.get(Coordinate::new(4, 4)).unwrap();
        assert_eq!(heavy.player, Player::Red);
        assert_eq!(heavy.orientation, Some(Orientation::North));
        assert_eq!(board.to_string().lines().nth(4), Some("4 ...IH..."));

        let mut bad = rows;
        bad[2] = "..x.....";
        assert!(matches!(Board::from_rows(&bad), Err(GhqError::MalformedPosition(_))));
        bad[2] = "...";
        assert!(Board::from_rows(&bad).is_err());
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::try_new(0, 0).is_ok());
        assert!(Coordinate::try_new(7, 7).is_ok());
        assert!(Coordinate::try_new(8, 0).is_err());
        assert!(Coordinate::try_new(0, -1).is_err());
    }

    #[test]
    fn test_offset_stops_at_edge() {
        let corner = Coordinate::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(1, 1), Some(Coordinate::new(1, 1)));
        assert_eq!(corner.orthogonal_neighbors().count(), 2);
    }

    #[test]
    fn test_coordinate_names() {
        assert_eq!(Coordinate::new(7, 0).algebraic(), "a1");
        assert_eq!(Coordinate::new(0, 7).algebraic(), "h8");
        assert_eq!(Coordinate::new(3, 4).to_string(), "3,4");
    }

    #[test]
    fn test_orientation_degrees() {
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_degrees(o.degrees()), Some(o));
        }
        assert_eq!(Orientation::from_degrees(360), None);
        assert_eq!(Orientation::from_degrees(30), None);
        assert_eq!(Orientation::East.vector(), (0, 1));
    }

    #[test]
    fn test_standard_board() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 10);
        assert_eq!(board.hq_count(Player::Red), 1);
        assert_eq!(board.hq_count(Player::Blue), 1);
        let blue_artillery = board.get(Coordinate::new(0, 1)).unwrap();
        assert_eq!(blue_artillery.orientation, Some(Orientation::South));
        assert!(board.pieces().all(|(_, p)| p.is_well_formed()));
    }

    #[test]
    fn test_serde_shape() {
        let piece = Piece::facing(UnitKind::Artillery, Player::Red, Orientation::NorthEast);
        let json = serde_json::to_string(&piece).unwrap();
        assert_eq!(json, r#"{"type":"ARTILLERY","player":"RED","orientation":45}"#);

        let coord: Coordinate = serde_json::from_str("[2,5]").unwrap();
        assert_eq!(coord, Coordinate::new(2, 5));
        assert!(serde_json::from_str::<Coordinate>("[9,0]").is_err());
        assert!(serde_json::from_str::<Orientation>("100").is_err());
    }

    #[test]
    fn test_board_diagram() {
        let text = Board::standard().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8 qr......");
    }
}
