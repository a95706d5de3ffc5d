//! Tests for the game engine.

use peer_tictactoe::{
    Coord, EngineErrorKind, GameEngine, GameStatus, MAX_BOARD_SIZE, Marker, WinnerResult,
};

fn play(game: &mut GameEngine, moves: &[(usize, usize)]) {
    for &(row, col) in moves {
        assert!(game.place_marker(row, col), "move ({row}, {col}) rejected");
    }
}

#[test]
fn test_initialize_board_size() {
    assert_eq!(GameEngine::with_defaults(3).board_size(), 3);
    assert_eq!(GameEngine::with_defaults(0).board_size(), 2);
    assert_eq!(GameEngine::with_defaults(usize::MAX).board_size(), MAX_BOARD_SIZE);
}

#[test]
fn test_oversized_board_is_rejected() {
    let err = GameEngine::new(1usize << 33, vec![Marker::O, Marker::X], Marker::O).unwrap_err();
    assert_eq!(err.kind, EngineErrorKind::BoardTooLarge(1usize << 33));

    let largest = GameEngine::new(MAX_BOARD_SIZE, vec![Marker::O, Marker::X], Marker::O).unwrap();
    assert_eq!(largest.board_size(), MAX_BOARD_SIZE);

    let game = GameEngine::with_defaults(3);
    assert!(game.create_new_game(MAX_BOARD_SIZE + 1, Marker::O).is_err());
}

#[test]
fn test_fresh_game_is_empty() {
    for size in 2..=6 {
        let game = GameEngine::new(size, vec![Marker::O, Marker::X], Marker::X).unwrap();
        let board = game.board_snapshot();
        assert!(board.rows().flatten().all(|m| *m == Marker::None));
        assert_eq!(board.rows().count(), size);
        assert_eq!(game.current_marker(), Marker::X);
    }
}

#[test]
fn test_set_marker() {
    let mut game = GameEngine::with_defaults(2);
    assert_eq!(game.current_marker(), Marker::O);

    assert!(!game.place_marker(0, 2));
    assert!(!game.place_marker(2, 0));
    assert_eq!(game.current_marker(), Marker::O);

    assert!(game.place_marker(0, 0));
    assert_eq!(game.current_marker(), Marker::X);
    assert!(!game.place_marker(0, 0));
    assert_eq!(game.current_marker(), Marker::X);

    assert!(game.place_marker(1, 0));
    assert_eq!(game.current_marker(), Marker::O);
}

#[test]
fn test_failed_placement_leaves_board_unchanged() {
    let mut game = GameEngine::with_defaults(3);
    play(&mut game, &[(0, 0), (1, 1)]);
    let before = game.clone();

    assert!(!game.place_marker(1, 1));
    assert!(!game.place_marker(3, 0));
    assert!(!game.place_marker(usize::MAX, usize::MAX));

    assert_eq!(game, before);
}

#[test]
fn test_turn_alternation() {
    let mut game = GameEngine::with_defaults(4);
    let cells: Vec<(usize, usize)> = (0..4).flat_map(|r| (0..4).map(move |c| (r, c))).collect();
    for (k, &(row, col)) in cells.iter().enumerate() {
        let expected = if k % 2 == 0 { Marker::O } else { Marker::X };
        assert_eq!(game.current_marker(), expected);
        assert!(game.place_marker(row, col));
    }
}

#[test]
fn test_reversed_cycle_rotates_from_start() {
    let mut game = GameEngine::new(3, vec![Marker::X, Marker::O], Marker::O).unwrap();
    let mut seen = Vec::new();
    for (row, col) in [(0, 0), (0, 1), (0, 2)] {
        seen.push(game.current_marker());
        game.place_marker(row, col);
    }
    assert_eq!(seen, vec![Marker::O, Marker::X, Marker::O]);
}

#[test]
fn test_create_new_game() {
    let mut game = GameEngine::with_defaults(2);
    play(&mut game, &[(0, 0), (1, 0), (1, 1), (0, 1)]);

    let game = game.create_new_game(2, Marker::X).unwrap();
    assert_eq!(
        game.board_snapshot().to_rows(),
        vec![vec![Marker::None, Marker::None], vec![Marker::None, Marker::None]]
    );
    assert_eq!(game.current_marker(), Marker::X);
    assert!(game.history().is_empty());
}

#[test]
fn test_create_new_game_keeps_cycle_and_resizes() {
    let game = GameEngine::new(2, vec![Marker::X], Marker::X).unwrap();
    let next = game.create_new_game(5, Marker::X).unwrap();
    assert_eq!(next.board_size(), 5);
    assert_eq!(next.marker_cycle(), &[Marker::X]);
    assert!(game.create_new_game(3, Marker::O).is_err());
}

#[test]
fn test_get_board_markers() {
    let mut game = GameEngine::with_defaults(2);
    play(&mut game, &[(0, 0), (1, 0), (1, 1), (0, 1)]);
    assert_eq!(
        game.board_snapshot().to_rows(),
        vec![vec![Marker::O, Marker::X], vec![Marker::X, Marker::O]]
    );
}

#[test]
fn test_snapshot_is_detached() {
    let mut game = GameEngine::with_defaults(3);
    let snapshot = game.board_snapshot();
    game.place_marker(0, 0);
    assert_eq!(snapshot.get(Coord::new(0, 0)), Some(Marker::None));
    assert_eq!(game.board().get(Coord::new(0, 0)), Some(Marker::O));
}

#[test]
fn test_calc_winner() {
    let mut game = GameEngine::with_defaults(2);
    assert_eq!(game.calc_winner(), WinnerResult::NoWinner);
    game.place_marker(0, 0);
    assert_eq!(game.calc_winner(), WinnerResult::NoWinner);
    game.place_marker(1, 0);
    assert_eq!(game.calc_winner(), WinnerResult::NoWinner);
    game.place_marker(1, 1);
    assert_eq!(game.calc_winner().marker(), Some(Marker::O));
}

#[test]
fn test_winner_line() {
    // Row: X . / O O
    let mut game = GameEngine::with_defaults(2);
    play(&mut game, &[(1, 0), (0, 0), (1, 1)]);
    assert_eq!(
        game.calc_winner(),
        WinnerResult::Winner {
            marker: Marker::O,
            line: [Coord::new(1, 0), Coord::new(1, 1)],
        }
    );
    assert!(!game.board_is_full());

    // Column: . O / X O
    let mut game = game.create_new_game(2, Marker::O).unwrap();
    play(&mut game, &[(0, 1), (1, 0), (1, 1)]);
    assert_eq!(game.calc_winner().line(), Some([Coord::new(0, 1), Coord::new(1, 1)]));

    // Diagonal: O X / . O
    let mut game = game.create_new_game(2, Marker::O).unwrap();
    play(&mut game, &[(1, 1), (0, 1), (0, 0)]);
    assert_eq!(game.calc_winner().line(), Some([Coord::new(0, 0), Coord::new(1, 1)]));

    // Anti-diagonal: X O / O .
    let mut game = game.create_new_game(2, Marker::O).unwrap();
    play(&mut game, &[(1, 0), (0, 0), (0, 1)]);
    assert_eq!(game.calc_winner().line(), Some([Coord::new(0, 1), Coord::new(1, 0)]));
}

#[test]
fn test_board_is_full() {
    let mut game = GameEngine::with_defaults(2);
    assert!(!game.board_is_full());
    play(&mut game, &[(0, 0), (1, 0), (1, 1), (0, 1)]);
    assert!(game.board_is_full());
}

#[test]
fn test_two_by_two_full_board_always_has_a_line() {
    let mut game = GameEngine::with_defaults(2);
    play(&mut game, &[(0, 0), (1, 0), (1, 1), (0, 1)]);
    assert!(game.board_is_full());
    assert_eq!(
        game.calc_winner(),
        WinnerResult::Winner {
            marker: Marker::O,
            line: [Coord::new(0, 0), Coord::new(1, 1)],
        }
    );
    assert_eq!(game.status(), GameStatus::Won(Marker::O));
}

#[test]
fn test_draw_on_three_by_three() {
    let mut game = GameEngine::with_defaults(3);
    play(
        &mut game,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
    );
    assert!(game.board_is_full());
    assert_eq!(game.calc_winner(), WinnerResult::NoWinner);
    assert_eq!(game.status(), GameStatus::Drawn);
}

#[test]
fn test_larger_board_needs_full_line() {
    let mut game = GameEngine::with_defaults(4);
    // O fills three of row 0, X plays row 3.
    play(&mut game, &[(0, 0), (3, 0), (0, 1), (3, 1), (0, 2), (3, 2)]);
    assert_eq!(game.status(), GameStatus::InProgress);
    play(&mut game, &[(0, 3)]);
    assert_eq!(
        game.calc_winner().line(),
        Some([Coord::new(0, 0), Coord::new(0, 3)])
    );
}
