//! Actions and their canonical notation

use serde::{Deserialize, Serialize};

use crate::board::{Coordinate, Orientation};
use crate::units::UnitKind;

/// Maximum actions a side commits before the turn passes
pub const ACTIONS_PER_TURN: usize = 3;

/// A single action within a turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "PascalCase")]
pub enum Action {
    Skip,
    Reinforce {
        kind: UnitKind,
        to: Coordinate,
    },
    Move {
        from: Coordinate,
        to: Coordinate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        capture: Option<Coordinate>,
    },
    MoveAndOrient {
        from: Coordinate,
        to: Coordinate,
        orientation: Orientation,
    },
    ChangeOrientation {
        at: Coordinate,
        orientation: Orientation,
    },
}

impl Action {
    /// Canonical notation; two actions are the same move iff their notation
    /// matches. Rotating in place is written like a `MoveAndOrient` onto the
    /// unit's own square.
    pub fn notation(&self) -> String {
        match self {
            Action::Skip => "Skip".to_string(),
            Action::Reinforce { kind, to } => format!("Reinforce {} at {}", kind, to),
            Action::Move { from, to, capture: None } => format!("{} -> {}", from, to),
            Action::Move { from, to, capture: Some(x) } => format!("{} -> {} x {}", from, to, x),
            Action::MoveAndOrient { from, to, orientation } => {
                format!("{} -> {} facing {}", from, to, orientation)
            }
            Action::ChangeOrientation { at, orientation } => {
                format!("{} -> {} facing {}", at, at, orientation)
            }
        }
    }

    /// Same shape as [`Action::notation`] with algebraic square names
    pub fn algebraic(&self) -> String {
        match self {
            Action::Skip => "Skip".to_string(),
            Action::Reinforce { kind, to } => format!("Reinforce {} at {}", kind, to.algebraic()),
            Action::Move { from, to, capture } => {
                let mut s = format!("{} -> {}", from.algebraic(), to.algebraic());
                if let Some(x) = capture {
                    s.push_str(&format!(" x {}", x.algebraic()));
                }
                s
            }
            Action::MoveAndOrient { from, to, orientation } => {
                format!("{} -> {} facing {}", from.algebraic(), to.algebraic(), orientation)
            }
            Action::ChangeOrientation { at, orientation } => {
                format!("{} -> {} facing {}", at.algebraic(), at.algebraic(), orientation)
            }
        }
    }

    /// Square the acting unit occupies once the action is done
    pub fn landing(&self) -> Option<Coordinate> {
        match *self {
            Action::Skip => None,
            Action::Reinforce { to, .. } => Some(to),
            Action::Move { to, .. } => Some(to),
            Action::MoveAndOrient { to, .. } => Some(to),
            Action::ChangeOrientation { at, .. } => Some(at),
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Action::Skip)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.notation())
    }
}
