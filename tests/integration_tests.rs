//! Integration tests for the rules engine: move generation, captures,
//! repetition, passing, and scoring.

use scalable_go::board::{Board, Color, Coord};
use scalable_go::error::GoError;
use scalable_go::game::Game;
use scalable_go::go_move::{Move, MoveCheck};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Board with the given black and white stones, coordinates as `(x, y)`.
fn board_with(size: usize, black: &[(usize, usize)], white: &[(usize, usize)]) -> Board {
    let mut grid = vec![vec![None; size]; size];
    for &(x, y) in black {
        grid[y][x] = Some(Color::Black);
    }
    for &(x, y) in white {
        grid[y][x] = Some(Color::White);
    }
    Board::from_grid(&grid).unwrap()
}

/// Resolve a move the way an external caller would and hand it to the game.
fn play_at(game: &mut Game, x: usize, y: usize, color: Color) -> Result<(), GoError> {
    let mut mv = Move::new(game.get_board(), Coord::new(x, y))?;
    mv.check_move(color)?;
    game.make_move(&mv, color)
}

/// Play alternating moves starting with black.
fn play_sequence(game: &mut Game, moves: &[(usize, usize)]) {
    let mut color = Color::Black;
    for &(x, y) in moves {
        play_at(game, x, y, color).unwrap();
        color = color.opponent();
    }
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_blank_board_moves_place_one_stone() {
    let mut game = Game::new(3).unwrap();
    game.generate_moves(Color::Black).unwrap();
    let moves = game.get_move_list();
    assert_eq!(moves.len(), 10);

    for (mv, coord) in moves.iter().zip(Board::new(3).unwrap().coords()) {
        assert_eq!(mv.piece(), Some(coord));
        let stones: Vec<Coord> = mv
            .board()
            .coords()
            .filter(|&c| mv.board().get(c).is_some())
            .collect();
        assert_eq!(stones, vec![coord]);
        assert_eq!(mv.board().get(coord), Some(Color::Black));
    }
    assert!(moves[9].is_pass());
}

#[test]
fn test_blank_board_moves_all_sizes() {
    for size in (3..=9).step_by(2) {
        let mut game = Game::new(size).unwrap();
        assert!(game.generate_moves(Color::White).unwrap());
        assert_eq!(game.get_move_list().len(), size * size + 1);
    }
}

#[test]
fn test_suicide_excluded_from_moves() {
    let board = board_with(5, &[], &[(1, 2), (3, 2), (2, 1), (2, 3)]);
    let mut game = Game::from_board(board);
    game.generate_moves(Color::Black).unwrap();
    assert!(
        game.get_move_list()
            .iter()
            .all(|mv| mv.piece() != Some(Coord::new(2, 2)))
    );
    // 25 points, 4 occupied, 1 suicide, plus pass.
    assert_eq!(game.get_move_list().len(), 21);

    // White may fill its own eye.
    assert!(
        game.find_move(Some(Coord::new(2, 2)), Color::White)
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_check_move_reports_suicide() {
    let board = board_with(3, &[], &[(0, 1), (1, 0)]);
    let mut mv = Move::new(&board, Coord::new(0, 0)).unwrap();
    assert_eq!(mv.check_move(Color::Black), Ok(MoveCheck::Suicide));
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn test_capture_single_stone() {
    let board = board_with(5, &[(1, 2), (3, 2), (2, 3)], &[(2, 2)]);
    let mut game = Game::from_board(board);
    play_at(&mut game, 2, 1, Color::Black).unwrap();

    assert_eq!(game.get_board().get(Coord::new(2, 2)), None);
    assert_eq!(game.get_prisoner_count(), [1, 0]);
    assert_eq!(game.get_pieces_placed(), [1, 0]);
}

#[test]
fn test_capture_group_counts_every_stone() {
    let board = board_with(5, &[(0, 1), (1, 1), (2, 1)], &[(0, 0), (1, 0), (2, 0)]);
    let mut game = Game::from_board(board);
    play_at(&mut game, 3, 0, Color::Black).unwrap();
    assert_eq!(game.get_prisoner_count(), [3, 0]);
    for x in 0..3 {
        assert_eq!(game.get_board().get(Coord::new(x, 0)), None);
    }
}

#[test]
fn test_simple_game_board() {
    let mut game = Game::new(3).unwrap();
    play_sequence(
        &mut game,
        &[(0, 1), (0, 0), (1, 1), (1, 0), (2, 1), (0, 2), (2, 0), (1, 2), (2, 2)],
    );

    let expected = board_with(3, &[(2, 0), (0, 1), (1, 1), (2, 1), (2, 2)], &[]);
    assert_eq!(game.get_board(), &expected);
    assert_eq!(game.get_prisoner_count(), [4, 0]);
    assert_eq!(game.get_pieces_placed(), [5, 4]);
}

// =============================================================================
// Repetition
// =============================================================================

/// White has just captured at (2,2); black playing there again would
/// recreate the previous position.
fn repeat_setup() -> Game {
    let board = board_with(5, &[(1, 1), (3, 1), (2, 2)], &[(1, 2), (3, 2), (2, 3)]);
    let mut game = Game::from_board(board);
    play_at(&mut game, 0, 2, Color::Black).unwrap();
    play_at(&mut game, 2, 1, Color::White).unwrap();
    assert_eq!(game.get_prisoner_count(), [0, 1]);
    game
}

#[test]
fn test_repeat_found_in_history() {
    let game = repeat_setup();
    let mut mv = Move::new(game.get_board(), Coord::new(2, 2)).unwrap();
    mv.check_move(Color::Black).unwrap();
    assert!(game.check_move_history(&mv));
}

#[test]
fn test_repeat_rejected() {
    let mut game = repeat_setup();
    let before = game.clone();
    assert_eq!(
        play_at(&mut game, 2, 2, Color::Black),
        Err(GoError::BadMove)
    );
    assert_eq!(game, before);
}

#[test]
fn test_position_never_repeats_after_move() {
    let mut game = Game::new(3).unwrap();
    play_sequence(&mut game, &[(1, 1), (0, 0), (2, 2)]);
    game.generate_moves(Color::White).unwrap();
    for mv in game.get_move_list().iter().filter(|mv| !mv.is_pass()) {
        assert!(!game.check_move_history(mv));
    }
}

// =============================================================================
// Passing
// =============================================================================

#[test]
fn test_pass_credits_opponent() {
    let mut game = Game::new(5).unwrap();
    play_at(&mut game, 2, 2, Color::Black).unwrap();
    let board = game.get_board().clone();

    game.make_move(&Move::pass(game.get_board()), Color::White)
        .unwrap();
    assert_eq!(game.get_board(), &board);
    assert_eq!(game.get_prisoner_count(), [1, 0]);
    assert_eq!(game.get_pieces_placed(), [1, 1]);
    assert!(!game.is_over());

    game.make_move(&Move::pass(game.get_board()), Color::Black)
        .unwrap();
    assert_eq!(game.get_prisoner_count(), [1, 1]);
    assert_eq!(game.get_pieces_placed(), [2, 1]);
    assert!(game.is_over());

    let history = game.move_history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].piece(), Some(Coord::new(2, 2)));
    assert!(history[1].is_pass() && history[2].is_pass());
    assert!(history.iter().all(|mv| mv.board() == &board));
}

#[test]
fn test_bad_move_leaves_game_unchanged() {
    let mut game = Game::new(3).unwrap();
    play_at(&mut game, 1, 1, Color::Black).unwrap();
    let before = game.clone();
    // Occupied point: check_move leaves the board as it is.
    assert_eq!(
        play_at(&mut game, 1, 1, Color::White),
        Err(GoError::BadMove)
    );
    assert_eq!(game, before);
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_blank_board_scores_zero() {
    for size in (3..=19).step_by(2) {
        assert_eq!(Game::new(size).unwrap().calculate_scores(), [0, 0]);
    }
}

#[test]
fn test_lone_stone_owns_board() {
    for size in [3, 5, 9] {
        let game = Game::from_board(board_with(size, &[], &[(1, 1)]));
        assert_eq!(game.calculate_scores(), [0, size * size - 1]);

        let game = Game::from_board(board_with(size, &[(1, 1)], &[]));
        assert_eq!(game.calculate_scores(), [size * size - 1, 0]);
    }
}

#[test]
fn test_split_board_score() {
    let game = Game::from_board(board_with(3, &[(0, 1), (1, 1), (2, 1)], &[(0, 0), (1, 0)]));
    assert_eq!(game.calculate_scores(), [3, 0]);
}

#[test]
fn test_simple_game_score() {
    let mut game = Game::new(3).unwrap();
    play_sequence(
        &mut game,
        &[(0, 1), (0, 0), (1, 1), (1, 0), (2, 1), (0, 2), (2, 0), (1, 2), (2, 2)],
    );
    // 4 points of territory and 4 prisoners.
    assert_eq!(game.calculate_scores(), [8, 0]);
}

#[test]
fn test_score_includes_pass_prisoners() {
    let mut game = Game::new(3).unwrap();
    play_at(&mut game, 1, 1, Color::Black).unwrap();
    game.make_move(&Move::pass(game.get_board()), Color::White)
        .unwrap();
    assert_eq!(game.calculate_scores(), [9, 0]);
}
