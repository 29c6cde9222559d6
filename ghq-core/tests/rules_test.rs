//! Rules scenarios played through the public API
//!
//! Boards are drawn with the same symbols the board diagram prints:
//! q HQ, i infantry, f armored infantry, p airborne, r artillery,
//! t armored artillery, h heavy artillery. RED is uppercase.

use ghq_core::{
    capture_candidates, engaged_pairs, evaluate, terminal_state, Action, Board, Coordinate, EngagedPair,
    GhqError, Orientation, Piece, Player, Position, ReserveFleet, Setup, TimeControl, Tutorial, UnitKind, WinReason,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn c(row: u8, col: u8) -> Coordinate {
    Coordinate::new(row, col)
}

fn unit(symbol: char) -> Piece {
    Piece::from_symbol(symbol).unwrap_or_else(|| panic!("unknown symbol {}", symbol))
}

/// Board from eight rows of symbols, row 0 first. Artillery faces away
/// from its own side.
fn board(rows: [&str; 8]) -> Board {
    Board::from_rows(&rows).unwrap()
}

fn puzzle(rows: [&str; 8]) -> Position {
    Position::from_board_and_reserves(board(rows), ReserveFleet::empty(), ReserveFleet::empty()).unwrap()
}

fn play(position: Position, actions: &[Action]) -> Position {
    actions
        .iter()
        .fold(position, |p, &a| p.apply(a).unwrap_or_else(|e| panic!("{} rejected: {}", a, e)))
}

// ============================================================================
// CAPTURES
// ============================================================================

#[test]
fn test_infantry_captures_infantry() {
    let game = puzzle([
        "q.......",
        "........",
        "........",
        "...i....",
        "...II...",
        "........",
        "........",
        ".......Q",
    ]);
    let capture = Action::Move { from: c(4, 4), to: c(3, 4), capture: Some(c(3, 3)) };
    let game = play(game, &[capture]);
    assert!(game.board().is_empty(c(3, 3)));
    assert_eq!(game.captured_by(Player::Red), &[unit('i')]);
}

#[test]
fn test_armored_infantry_captures_engaged_infantry() {
    let game = puzzle([
        "q.......",
        "........",
        "........",
        "...i....",
        "...Ii...",
        "..F.I...",
        "........",
        ".......Q",
    ]);
    let moves = game.allowed_moves();
    assert!(moves.contains(&Action::Move { from: c(5, 2), to: c(3, 2), capture: Some(c(3, 3)) }));
}

#[test]
fn test_infantry_captures_artillery() {
    let game = puzzle([
        "q.......",
        "........",
        "........",
        "...r.I..",
        "........",
        "........",
        "........",
        ".......Q",
    ]);
    let capture = Action::Move { from: c(3, 5), to: c(3, 4), capture: Some(c(3, 3)) };
    assert!(game.allowed_moves().contains(&capture));
}

#[test]
fn test_defended_artillery_still_offered() {
    let game = puzzle([
        "q.......",
        "...I....",
        "....i...",
        "...rI...",
        "........",
        "........",
        "........",
        ".......Q",
    ]);
    let moves = game.allowed_moves();
    assert!(moves.contains(&Action::Move { from: c(1, 3), to: c(2, 3), capture: Some(c(3, 3)) }));
    assert!(moves.contains(&Action::Move { from: c(1, 3), to: c(2, 3), capture: Some(c(2, 4)) }));
}

#[test]
fn test_airborne_drops_onto_artillery() {
    let game = puzzle([
        "q.......",
        "........",
        "....h...",
        "........",
        "........",
        "........",
        "........",
        "...P...Q",
    ]);
    let capture = Action::Move { from: c(7, 3), to: c(2, 3), capture: Some(c(2, 4)) };
    let game = play(game, &[capture]);
    assert_eq!(game.captured_by(Player::Red)[0].kind, UnitKind::HeavyArtillery);
    assert_eq!(game.board().get(c(2, 3)).map(|p| p.kind), Some(UnitKind::AirborneInfantry));
}

#[test]
fn test_engagement_scenario() {
    let game = puzzle([
        "q.......",
        "........",
        "........",
        "...i....",
        "...II...",
        "........",
        "........",
        ".......Q",
    ]);
    let pairs = engaged_pairs(game.board(), None);
    assert_eq!(pairs, vec![EngagedPair { red: c(4, 3), blue: c(3, 3) }]);
    assert!(capture_candidates(c(4, 4), game.board()).is_empty());
    assert_eq!(engaged_pairs(game.board(), None), pairs);
}

// ============================================================================
// GAME OVER
// ============================================================================

#[test]
fn test_hq_capture_ends_game() {
    let game = puzzle([
        "q.......",
        "I.......",
        "........",
        "........",
        "........",
        "........",
        "........",
        ".......Q",
    ]);

    // Occupied squares are never destinations
    let onto_hq = game.apply(Action::Move { from: c(1, 0), to: c(0, 0), capture: Some(c(0, 0)) });
    assert!(matches!(onto_hq, Err(GhqError::InvalidAction(_))));

    let game = play(game, &[Action::Move { from: c(1, 0), to: c(0, 1), capture: Some(c(0, 0)) }]);
    assert!(!game.board().is_hq_on_board(Player::Blue));

    let result = terminal_state(&game, &TimeControl::default()).unwrap().unwrap();
    assert_eq!(result.winner, Player::Red);
    assert_eq!(result.reason, WinReason::HqCapture);
    assert_eq!(result.to_string(), "RED wins by HQ capture");
}

#[test]
fn test_tutorial_hq_capture_follows_hint() {
    let tutorial = Tutorial::find("Infantry capture HQ").unwrap();
    let game = tutorial.setup().unwrap().to_position().unwrap();
    let (from, to) = tutorial.hint.unwrap();

    let game = play(
        game,
        &[
            Action::Move { from, to, capture: None },
            Action::Move { from: c(0, 2), to: c(0, 1), capture: Some(c(0, 0)) },
        ],
    );
    let result = terminal_state(&game, &TimeControl::default()).unwrap().unwrap();
    assert_eq!(result.winner, Player::Red);
    assert_eq!(result.reason, WinReason::HqCapture);
}

#[test]
fn test_artillery_bombards_hq_off_the_board() {
    let game = puzzle([
        "........",
        "........",
        "........",
        "........",
        "...RR...",
        "..q.....",
        "........",
        ".......Q",
    ]);
    let game = play(
        game,
        &[
            Action::ChangeOrientation { at: c(4, 3), orientation: Orientation::SouthWest },
            Action::Skip,
        ],
    );

    // The HQ cannot step into RED's fire, and BLUE passes
    let moves = game.allowed_moves();
    assert!(!moves.contains(&Action::Move { from: c(5, 2), to: c(6, 1), capture: None }));
    assert_eq!(terminal_state(&game, &TimeControl::default()).unwrap(), None);

    let game = play(game, &[Action::Skip]);
    assert!(game.board().is_empty(c(5, 2)));
    assert_eq!(game.captured_by(Player::Red)[0].kind, UnitKind::Hq);
    let result = terminal_state(&game, &TimeControl::default()).unwrap().unwrap();
    assert_eq!(result.winner, Player::Red);
}

#[test]
fn test_advanced_artillery_removes_infantry_next_turn() {
    let game = puzzle([
        "q.......",
        "........",
        "........",
        "....i...",
        "........",
        "........",
        "....R...",
        ".......Q",
    ]);
    let game = play(
        game,
        &[
            Action::MoveAndOrient { from: c(6, 4), to: c(5, 4), orientation: Orientation::North },
            Action::Skip,
        ],
    );
    assert!(!game.board().is_empty(c(3, 4)));

    let game = play(game, &[Action::Skip]);
    assert!(game.board().is_empty(c(3, 4)));
    assert_eq!(game.turn(), 3);
}

// ============================================================================
// TURN ENGINE
// ============================================================================

#[test]
fn test_skip_is_always_allowed() {
    let mut game = Position::initial();
    for i in 0..40 {
        let moves = game.allowed_moves();
        assert_eq!(moves[0], Action::Skip);
        if terminal_state(&game, &TimeControl::default()).map_or(true, |r| r.is_some()) {
            break;
        }
        if moves.len() == 1 {
            game = game.apply(Action::Skip).unwrap();
            continue;
        }
        // Walk the move list deterministically, never picking Skip
        let pick = moves[1 + (i * 7) % (moves.len() - 1).max(1)];
        let before = game.clone();
        game = game.apply(pick).unwrap();
        assert_ne!(game, before);
        assert!(game.actions_remaining() >= 1);
    }
}

#[test]
fn test_reserve_exhausts() {
    let mut reserve = ReserveFleet::empty();
    reserve.infantry = 1;
    let game = Position::from_board_and_reserves(Board::standard(), reserve, ReserveFleet::empty()).unwrap();
    let game = play(game, &[Action::Reinforce { kind: UnitKind::Infantry, to: c(7, 1) }]);
    assert_eq!(game.reserve(Player::Red).total(), 0);
    assert!(!game.allowed_moves().iter().any(|m| matches!(m, Action::Reinforce { .. })));
}

#[test]
fn test_initial_evaluation_stays_balanced_after_mirrored_turns() {
    let game = play(Position::initial(), &[Action::Skip, Action::Skip]);
    assert_eq!(evaluate(&game), 0.0);
}

// ============================================================================
// SETUP FILES
// ============================================================================

#[test]
fn test_setup_roundtrip() {
    let game = play(Position::initial(), &[Action::Move { from: c(6, 5), to: c(5, 5), capture: None }, Action::Skip]);
    let json = game.setup().to_json().unwrap();
    let restored = Setup::from_json(&json).unwrap().to_position().unwrap();
    assert_eq!(restored.board(), game.board());
    assert_eq!(restored.current_player(), Player::Blue);
    assert_eq!(restored.allowed_moves(), game.allowed_moves());
}

#[test]
fn test_setup_roundtrip_mid_turn() {
    let step = Action::Move { from: c(6, 5), to: c(5, 5), capture: None };
    let game = play(Position::initial(), &[step]);
    let json = game.setup().to_json().unwrap();
    assert!(json.contains("thisTurnMoves"));

    let restored = Setup::from_json(&json).unwrap().to_position().unwrap();
    assert_eq!(restored.actions_remaining(), game.actions_remaining());
    assert_eq!(restored.acted_squares(), game.acted_squares());
    assert_eq!(restored.allowed_moves(), game.allowed_moves());

    // The remaining two actions finish RED's turn
    let rest = [
        Action::Move { from: c(6, 6), to: c(5, 6), capture: None },
        Action::Reinforce { kind: UnitKind::Infantry, to: c(7, 0) },
    ];
    let restored = play(restored, &rest);
    let game = play(game, &rest);
    assert_eq!(restored.current_player(), Player::Blue);
    assert_eq!(restored.board(), game.board());
    assert_eq!(restored.last_turn_moves(), game.last_turn_moves());
}

#[test]
fn test_setup_rejects_bad_orientation() {
    let json = r#"{
        "board": [
            [{"type": "ARTILLERY", "player": "BLUE", "orientation": 30}, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null]
        ]
    }"#;
    assert!(matches!(Setup::from_json(json), Err(GhqError::MalformedPosition(_))));
}

#[test]
fn test_setup_rejects_negative_reserve() {
    let json = r#"{"board": [[null,null,null,null,null,null,null,null],
        [null,null,null,null,null,null,null,null],[null,null,null,null,null,null,null,null],
        [null,null,null,null,null,null,null,null],[null,null,null,null,null,null,null,null],
        [null,null,null,null,null,null,null,null],[null,null,null,null,null,null,null,null],
        [null,null,null,null,null,null,null,null]],
        "redReserve": {"INFANTRY": -1}}"#;
    assert!(matches!(Setup::from_json(json), Err(GhqError::MalformedPosition(_))));
}

#[test]
fn test_setup_syntax_error_is_json_error() {
    assert!(matches!(Setup::from_json("{ not json"), Err(GhqError::Json(_))));
}
