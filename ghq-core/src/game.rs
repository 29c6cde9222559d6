//! Game state, move generation and the turn engine

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::action::{Action, ACTIONS_PER_TURN};
use crate::board::{Board, Coordinate, Orientation, Piece, Player};
use crate::bombard::bombarded_squares;
use crate::capture::{capture_candidates_after_move, clear_bombarded_squares};
use crate::error::{GhqError, Result};
use crate::reach::{destinations_with, reinforcement_squares_with};
use crate::units::ReserveFleet;

// ============================================================================
// SETUP
// ============================================================================

/// Caller-supplied starting point: tutorials, puzzles, saved games
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setup {
    pub board: Board,
    #[serde(default)]
    pub red_reserve: ReserveFleet,
    #[serde(default)]
    pub blue_reserve: ReserveFleet,
    #[serde(default = "first_player")]
    pub current_player: Player,
    /// Actions the side to move has already committed this turn
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub this_turn_moves: Vec<Action>,
}

fn first_player() -> Player {
    Player::Red
}

impl Setup {
    /// Parse a setup. Well-formed JSON holding out-of-range squares,
    /// orientations or counts is a [`GhqError::MalformedPosition`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                GhqError::MalformedPosition(e.to_string())
            } else {
                GhqError::Json(e)
            }
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build the position. A turn already holding a full set of actions
    /// would have been handed over, so it is malformed.
    pub fn to_position(&self) -> Result<Position> {
        if self.this_turn_moves.len() >= ACTIONS_PER_TURN {
            return Err(GhqError::MalformedPosition(format!(
                "{} actions committed this turn, at most {} allowed",
                self.this_turn_moves.len(),
                ACTIONS_PER_TURN - 1
            )));
        }
        if self.this_turn_moves.iter().any(Action::is_skip) {
            return Err(GhqError::MalformedPosition("Skip ends the turn and cannot be pending".to_string()));
        }

        let mut position = Position::from_board_and_reserves(self.board, self.red_reserve, self.blue_reserve)?;
        position.current_player = self.current_player;
        position.this_turn_moves = self.this_turn_moves.clone();
        Ok(position)
    }
}

// ============================================================================
// POSITION
// ============================================================================

/// Game state (clone to mutate)
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    board: Board,
    red_reserve: ReserveFleet,
    blue_reserve: ReserveFleet,
    current_player: Player,

    /// Actions committed so far this turn
    this_turn_moves: Vec<Action>,

    /// Actions of the previous turn, for replays
    last_turn_moves: Vec<Action>,

    /// Turn number, incremented on every handoff
    turn: u32,

    /// Board as each side found it when its last turn began
    red_turn_start_board: Board,
    blue_turn_start_board: Board,

    /// Units each side has taken
    red_captures: Vec<Piece>,
    blue_captures: Vec<Piece>,
}

impl Position {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard opening: fixed layout, full reserves, RED to move
    pub fn initial() -> Self {
        Self::new_unchecked(Board::standard(), ReserveFleet::standard(), ReserveFleet::standard())
    }

    /// Arbitrary layout with RED to move.
    ///
    /// Fails with [`GhqError::MalformedPosition`] when a unit's orientation
    /// does not match its kind or a side has more than one HQ.
    pub fn from_board_and_reserves(board: Board, red_reserve: ReserveFleet, blue_reserve: ReserveFleet) -> Result<Self> {
        validate_board(&board)?;
        Ok(Self::new_unchecked(board, red_reserve, blue_reserve))
    }

    fn new_unchecked(board: Board, red_reserve: ReserveFleet, blue_reserve: ReserveFleet) -> Self {
        Self {
            board,
            red_reserve,
            blue_reserve,
            current_player: Player::Red,
            this_turn_moves: Vec::new(),
            last_turn_moves: Vec::new(),
            turn: 1,
            red_turn_start_board: board,
            blue_turn_start_board: board,
            red_captures: Vec::new(),
            blue_captures: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn reserve(&self, player: Player) -> &ReserveFleet {
        match player {
            Player::Red => &self.red_reserve,
            Player::Blue => &self.blue_reserve,
        }
    }

    fn reserve_mut(&mut self, player: Player) -> &mut ReserveFleet {
        match player {
            Player::Red => &mut self.red_reserve,
            Player::Blue => &mut self.blue_reserve,
        }
    }

    pub fn this_turn_moves(&self) -> &[Action] {
        &self.this_turn_moves
    }

    pub fn last_turn_moves(&self) -> &[Action] {
        &self.last_turn_moves
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Actions the side to move may still commit this turn
    pub fn actions_remaining(&self) -> usize {
        ACTIONS_PER_TURN - self.this_turn_moves.len()
    }

    pub fn turn_start_board(&self, player: Player) -> &Board {
        match player {
            Player::Red => &self.red_turn_start_board,
            Player::Blue => &self.blue_turn_start_board,
        }
    }

    /// Units `player` has captured, oldest first
    pub fn captured_by(&self, player: Player) -> &[Piece] {
        match player {
            Player::Red => &self.red_captures,
            Player::Blue => &self.blue_captures,
        }
    }

    fn captures_mut(&mut self, player: Player) -> &mut Vec<Piece> {
        match player {
            Player::Red => &mut self.red_captures,
            Player::Blue => &mut self.blue_captures,
        }
    }

    /// Export board, reserves, side to move and the actions of the turn
    /// in progress
    pub fn setup(&self) -> Setup {
        Setup {
            board: self.board,
            red_reserve: self.red_reserve,
            blue_reserve: self.blue_reserve,
            current_player: self.current_player,
            this_turn_moves: self.this_turn_moves.clone(),
        }
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Squares of units that already acted this turn
    pub fn acted_squares(&self) -> FxHashSet<Coordinate> {
        self.this_turn_moves.iter().filter_map(Action::landing).collect()
    }

    /// Every legal action for the side to move. `Skip` always comes first.
    pub fn allowed_moves(&self) -> Vec<Action> {
        let board = &self.board;
        let player = self.current_player;
        let bombarded = bombarded_squares(board);
        let mut moves = vec![Action::Skip];

        let spawn_squares = reinforcement_squares_with(board, player, &bombarded);
        for kind in self.reserve(player).available() {
            for &to in &spawn_squares {
                moves.push(Action::Reinforce { kind, to });
            }
        }

        let acted = self.acted_squares();
        for (from, piece) in board.pieces_of(player) {
            if acted.contains(&from) {
                continue;
            }

            let destinations = destinations_with(from, board, &bombarded);
            if piece.is_directional() {
                self.generate_artillery_moves(from, piece, destinations, &mut moves);
            } else {
                self.generate_unit_moves(from, destinations, &mut moves);
            }
        }

        moves
    }

    fn generate_artillery_moves(&self, from: Coordinate, piece: Piece, mut destinations: Vec<Coordinate>, moves: &mut Vec<Action>) {
        // Artillery may also stay put and only turn
        destinations.push(from);

        for to in destinations {
            for orientation in Orientation::ALL {
                if to == from && piece.orientation == Some(orientation) {
                    continue;
                }
                moves.push(Action::MoveAndOrient { from, to, orientation });
            }
        }
    }

    fn generate_unit_moves(&self, from: Coordinate, destinations: Vec<Coordinate>, moves: &mut Vec<Action>) {
        for to in destinations {
            moves.push(Action::Move { from, to, capture: None });

            for capture in capture_candidates_after_move(&self.board, from, to) {
                moves.push(Action::Move { from, to, capture: Some(capture) });
            }
        }
    }

    /// Whether `action` is legal here, by canonical notation
    pub fn is_allowed(&self, action: &Action) -> bool {
        let candidate = action.notation();
        self.allowed_moves().iter().any(|m| m.notation() == candidate)
    }

    // ========================================================================
    // APPLY ACTION
    // ========================================================================

    /// Apply an action, returning the next position.
    ///
    /// The action must be among [`Position::allowed_moves`]; otherwise
    /// [`GhqError::InvalidAction`] is returned and nothing changes.
    pub fn apply(&self, action: Action) -> Result<Self> {
        if !self.is_allowed(&action) {
            return Err(GhqError::InvalidAction(action.notation()));
        }

        let mut next = self.clone();
        next.apply_internal(action)?;
        Ok(next)
    }

    fn apply_internal(&mut self, action: Action) -> Result<()> {
        let player = self.current_player;

        match action {
            Action::Skip => {}

            Action::Reinforce { kind, to } => {
                self.reserve_mut(player).take(kind)?;
                self.board.place(to, Piece::new(kind, player));
            }

            Action::Move { from, to, capture } => {
                let piece = self.take_piece(from)?;
                self.board.place(to, piece);

                if let Some(target) = capture {
                    if let Some(captured) = self.board.remove(target) {
                        self.captures_mut(player).push(captured);
                    }
                }
            }

            Action::MoveAndOrient { from, to, orientation } => {
                self.require_directional(from)?;
                let mut piece = self.take_piece(from)?;
                piece.orientation = Some(orientation);
                self.board.place(to, piece);
            }

            Action::ChangeOrientation { at, orientation } => {
                self.require_directional(at)?;
                if let Some(piece) = self.board.get_mut(at) {
                    piece.orientation = Some(orientation);
                }
            }
        }

        self.this_turn_moves.push(action);
        tracing::debug!(player = %player, action = %action, "applied action");

        if action.is_skip() || self.this_turn_moves.len() >= ACTIONS_PER_TURN {
            self.end_turn();
        }

        Ok(())
    }

    fn take_piece(&mut self, at: Coordinate) -> Result<Piece> {
        self.board
            .remove(at)
            .ok_or_else(|| GhqError::InvalidAction(format!("no unit on {}", at)))
    }

    fn require_directional(&self, at: Coordinate) -> Result<()> {
        match self.board.get(at) {
            Some(p) if p.is_directional() => Ok(()),
            Some(p) => Err(GhqError::InvalidAction(format!("{} on {} cannot be oriented", p.kind, at))),
            None => Err(GhqError::InvalidAction(format!("no unit on {}", at))),
        }
    }

    /// Hand the turn over. The incoming side's bombardment is resolved
    /// before its turn-start board is recorded.
    fn end_turn(&mut self) {
        self.last_turn_moves = std::mem::take(&mut self.this_turn_moves);
        self.current_player = self.current_player.opponent();
        self.turn += 1;

        let player = self.current_player;
        let removed = clear_bombarded_squares(&mut self.board, player);
        let removed_count = removed.len();
        self.captures_mut(player).extend(removed.into_iter().map(|(_, p)| p));

        match player {
            Player::Red => self.red_turn_start_board = self.board,
            Player::Blue => self.blue_turn_start_board = self.board,
        }

        tracing::debug!(turn = self.turn, player = %player, bombarded = removed_count, "turn handed over");
    }
}

/// Check unit orientations and HQ counts
pub fn validate_board(board: &Board) -> Result<()> {
    for (at, piece) in board.pieces() {
        if !piece.is_well_formed() {
            let detail = if piece.is_directional() { "needs an orientation" } else { "cannot carry an orientation" };
            return Err(GhqError::MalformedPosition(format!("{} on {} {}", piece.kind, at, detail)));
        }
    }

    for player in [Player::Red, Player::Blue] {
        if board.hq_count(player) > 1 {
            return Err(GhqError::MalformedPosition(format!("{} has more than one HQ", player)));
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
