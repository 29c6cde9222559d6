//! GHQ Core - Rules engine
//!
//! This crate provides the core game logic for GHQ:
//! - Board geometry (8x8 grid, row 0 at BLUE's back rank)
//! - Unit types, reserves and movement rules
//! - Artillery bombardment and infantry engagement
//! - Game state, move generation and turn handoff
//! - Terminal-state detection and position evaluation
//! - Named tutorial and puzzle boards

pub mod action;
pub mod board;
pub mod bombard;
pub mod capture;
pub mod error;
pub mod eval;
pub mod game;
pub mod gameover;
pub mod reach;
pub mod tutorial;
pub mod units;

// Re-exports for convenient access
pub use action::{Action, ACTIONS_PER_TURN};
pub use board::{Board, Coordinate, Orientation, Piece, Player, BOARD_SIZE};
pub use bombard::{bombarded_squares, is_bombarded_by, BombardedBy, Bombardment};
pub use capture::{capture_candidates, engaged_pairs, free_infantry_captures, EngagedPair, FreeCapture};
pub use error::{GhqError, Result};
pub use eval::{evaluate, score_sides, Scores};
pub use game::{Position, Setup};
pub use gameover::{terminal_state, GameOver, TimeControl, WinReason};
pub use reach::{destinations_for, reinforcement_squares_for};
pub use tutorial::{Category, Tutorial, TUTORIALS};
pub use units::{ReserveFleet, UnitKind, UNIT_TYPES};
