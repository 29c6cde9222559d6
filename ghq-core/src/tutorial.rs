//! Named tutorial, puzzle and endgame boards
//!
//! Boards are drawn with the diagram symbols of [`Board`]. Both reserves
//! are empty and RED moves first.

use serde::Serialize;

use crate::board::{Board, Coordinate, Orientation, Player, BOARD_SIZE};
use crate::error::{GhqError, Result};
use crate::game::Setup;
use crate::units::ReserveFleet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Capturing,
    Puzzles,
    Endgames,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Capturing => "capturing",
            Category::Puzzles => "puzzles",
            Category::Endgames => "endgames",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct Tutorial {
    pub name: &'static str,
    pub category: Category,
    rows: [&'static str; BOARD_SIZE as usize],
    /// Directional units that do not face away from their own side
    facings: &'static [(Coordinate, Orientation)],
    /// Suggested first action, as (from, to)
    pub hint: Option<(Coordinate, Coordinate)>,
}

const fn c(row: u8, col: u8) -> Coordinate {
    Coordinate::new(row, col)
}

const EMPTY: &str = "........";

pub static TUTORIALS: [Tutorial; 19] = [
    Tutorial {
        name: "Infantry capture infantry",
        category: Category::Capturing,
        rows: ["q.......", EMPTY, EMPTY, "...i....", "...II...", EMPTY, EMPTY, ".......Q"],
        facings: &[],
        hint: Some((c(4, 4), c(3, 4))),
    },
    Tutorial {
        name: "Armored infantry capture infantry",
        category: Category::Capturing,
        rows: ["q.......", EMPTY, EMPTY, "...i....", "...Ii...", "..F.I...", EMPTY, ".......Q"],
        facings: &[],
        hint: Some((c(5, 2), c(3, 2))),
    },
    Tutorial {
        name: "Infantry capture artillery",
        category: Category::Capturing,
        rows: ["q.......", EMPTY, EMPTY, "...r.I..", EMPTY, EMPTY, EMPTY, ".......Q"],
        facings: &[],
        hint: Some((c(3, 5), c(3, 4))),
    },
    Tutorial {
        name: "Infantry capture defended artillery",
        category: Category::Capturing,
        rows: ["q.......", "...I....", "....i...", "...rI...", EMPTY, EMPTY, EMPTY, ".......Q"],
        facings: &[],
        hint: Some((c(1, 3), c(2, 3))),
    },
    Tutorial {
        name: "Artillery capture infantry",
        category: Category::Capturing,
        rows: ["q.......", EMPTY, EMPTY, "....i...", EMPTY, EMPTY, "....R...", ".......Q"],
        facings: &[],
        hint: Some((c(6, 4), c(5, 4))),
    },
    Tutorial {
        name: "Artillery capture artillery",
        category: Category::Capturing,
        rows: ["q.......", EMPTY, "....r...", EMPTY, EMPTY, EMPTY, "....H...", ".......Q"],
        facings: &[],
        hint: Some((c(6, 4), c(5, 4))),
    },
    Tutorial {
        name: "Airborne capture artillery",
        category: Category::Capturing,
        rows: ["q.......", EMPTY, "....h...", EMPTY, EMPTY, EMPTY, EMPTY, "...P...Q"],
        facings: &[],
        hint: Some((c(7, 3), c(2, 3))),
    },
    Tutorial {
        name: "Airborne capture infantry",
        category: Category::Capturing,
        rows: ["q.......", EMPTY, "....i...", "....I...", EMPTY, EMPTY, EMPTY, "...P...Q"],
        facings: &[],
        hint: Some((c(7, 3), c(2, 3))),
    },
    Tutorial {
        name: "Infantry capture HQ",
        category: Category::Capturing,
        rows: ["q.I.....", EMPTY, ".I......", EMPTY, EMPTY, EMPTY, EMPTY, ".......Q"],
        facings: &[],
        hint: Some((c(2, 1), c(1, 0))),
    },
    Tutorial {
        name: "Infantry capture defended HQ",
        category: Category::Capturing,
        rows: ["q.II....", ".i......", ".I......", EMPTY, EMPTY, EMPTY, EMPTY, ".......Q"],
        facings: &[],
        hint: None,
    },
    Tutorial {
        name: "Capture an artillery",
        category: Category::Puzzles,
        rows: ["q..h.r..", "ii...i..", "..ir.i..", "..f.i.I.", "..I.FI..", "...T....", ".....III", ".......Q"],
        facings: &[(c(0, 3), Orientation::SouthEast)],
        hint: None,
    },
    Tutorial {
        name: "Capture two infantry",
        category: Category::Puzzles,
        rows: ["q...i...", "...iI...", "..iI.I..", ".iI.....", "iI......", "I.......", EMPTY, ".......Q"],
        facings: &[],
        hint: None,
    },
    Tutorial {
        name: "Capture HQ!",
        category: Category::Puzzles,
        rows: ["q.i.....", "i.......", "I.i.....", ".F......", EMPTY, EMPTY, EMPTY, "......PQ"],
        facings: &[],
        hint: None,
    },
    Tutorial {
        name: "Collapse the center line",
        category: Category::Puzzles,
        rows: ["q.......", EMPTY, ".i......", "..fff...", "..III...", ".....F..", EMPTY, ".......Q"],
        facings: &[],
        hint: None,
    },
    Tutorial {
        name: "Avoid being captured next turn",
        category: Category::Puzzles,
        rows: ["q.......", ".friit..", "..f..ii.", "...IRI..", "....F...", "....F...", EMPTY, ".......Q"],
        facings: &[(c(1, 2), Orientation::SouthEast), (c(1, 5), Orientation::SouthWest)],
        hint: None,
    },
    Tutorial {
        name: "Take back the advantage",
        category: Category::Puzzles,
        rows: ["q.......", "h.......", "...tf...", "..i..F..", EMPTY, "..IF....", EMPTY, ".......Q"],
        facings: &[(c(1, 0), Orientation::SouthEast), (c(2, 3), Orientation::SouthWest)],
        hint: None,
    },
    Tutorial {
        name: "Defend the attack",
        category: Category::Puzzles,
        rows: ["qrpf..r.", "ii......", "....f...", "...iti..", "....h...", "..F...I.", ".F.R.I.I", "TPFRIHRQ"],
        facings: &[
            (c(4, 4), Orientation::SouthEast),
            (c(6, 3), Orientation::NorthEast),
            (c(7, 5), Orientation::NorthWest),
        ],
        hint: None,
    },
    Tutorial {
        name: "Capture HQ with 2 artillery",
        category: Category::Endgames,
        rows: [EMPTY, EMPTY, EMPTY, EMPTY, "...RR...", "..q.....", EMPTY, ".......Q"],
        facings: &[],
        hint: None,
    },
    Tutorial {
        name: "Capture HQ with 1 artillery and 1 infantry",
        category: Category::Endgames,
        rows: [EMPTY, EMPTY, EMPTY, EMPTY, "...RI...", "..q.....", EMPTY, ".......Q"],
        facings: &[],
        hint: None,
    },
];

impl Tutorial {
    /// Look up a board by name, ignoring case
    pub fn find(name: &str) -> Option<&'static Tutorial> {
        TUTORIALS.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn board(&self) -> Result<Board> {
        let mut board = Board::from_rows(&self.rows)?;
        for &(at, orientation) in self.facings {
            match board.get_mut(at) {
                Some(piece) if piece.is_directional() => piece.orientation = Some(orientation),
                _ => {
                    return Err(GhqError::MalformedPosition(format!(
                        "{}: no directional unit on {}",
                        self.name, at
                    )))
                }
            }
        }
        Ok(board)
    }

    pub fn setup(&self) -> Result<Setup> {
        Ok(Setup {
            board: self.board()?,
            red_reserve: ReserveFleet::empty(),
            blue_reserve: ReserveFleet::empty(),
            current_player: Player::Red,
            this_turn_moves: Vec::new(),
        })
    }
}
