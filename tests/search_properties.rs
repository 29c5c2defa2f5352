use minimax::games::connect4::{Connect4Move, Connect4State};
use minimax::games::tictactoe::{TicTacToeMove, TicTacToeState};
use minimax::{GameError, GameState, Minimax, SearchConfig, SearchResult, Side};
use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Plays random legal moves from an empty board, stopping at a random ply or
/// as soon as the game ends. Returns the board and the side to move.
fn random_reachable<S: GameState>(mut board: S, rng: &mut Xoshiro256PlusPlus) -> (S, Side) {
    let cells = board.cells().len();
    let plies = rng.next_u32() as usize % cells;
    let mut side = Side::First;
    for _ in 0..plies {
        if board.is_terminal() {
            break;
        }
        let moves = board.possible_moves();
        let mv = moves[rng.next_u32() as usize % moves.len()];
        board.place(mv, side).unwrap();
        side = side.opponent();
    }
    (board, side)
}

#[test]
fn test_never_two_winners() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
    for _ in 0..500 {
        let (board, _) = random_reachable(Connect4State::default(), &mut rng);
        assert!(!(board.has_won(Side::First) && board.has_won(Side::Second)), "\n{}", board);
        let (board, _) = random_reachable(TicTacToeState::new(), &mut rng);
        assert!(!(board.has_won(Side::First) && board.has_won(Side::Second)), "\n{}", board);
    }
}

#[test]
fn test_mark_counts_stay_balanced() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
    for _ in 0..200 {
        let (board, side) = random_reachable(Connect4State::default(), &mut rng);
        let diff = board.count(Side::First) as i64 - board.count(Side::Second) as i64;
        assert!(diff == 0 || diff == 1);
        assert_eq!(board.side_to_move(), side);
    }
}

#[test]
fn test_chosen_move_is_legal_and_board_untouched() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
    let mut engine = Minimax::default();
    for _ in 0..40 {
        let (mut board, side) = random_reachable(Connect4State::default(), &mut rng);
        if board.is_full() {
            continue;
        }
        let before = board.clone();
        let result = engine.choose_move(&mut board, side, Some(3)).unwrap();
        assert_eq!(board, before);
        assert!(board.is_legal(result.mv), "{:?} on\n{}", result, board);
    }
}

#[test]
fn test_search_is_deterministic() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);
    for _ in 0..20 {
        let (mut board, side) = random_reachable(Connect4State::default(), &mut rng);
        if board.is_full() {
            continue;
        }
        let first = Minimax::default().choose_move(&mut board, side, Some(4));
        let second = Minimax::default().choose_move(&mut board, side, Some(4));
        assert_eq!(first, second);
    }
}

#[test]
fn test_pruning_matches_plain_minimax_connect4() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
    let mut plain = Minimax::new(false);
    let mut pruned = Minimax::new(true);
    let mut incremental = Minimax::from_config(&SearchConfig::default().with_incremental(true));
    for _ in 0..30 {
        let (mut board, side) = random_reachable(Connect4State::default(), &mut rng);
        if board.is_full() {
            continue;
        }
        let a = plain.choose_move(&mut board, side, Some(3)).unwrap();
        let b = pruned.choose_move(&mut board, side, Some(3)).unwrap();
        let c = incremental.choose_move(&mut board, side, Some(3)).unwrap();
        assert_eq!(a, b, "\n{}", board);
        assert_eq!(a, c, "\n{}", board);
        assert!(pruned.last_statistics().total_nodes <= plain.last_statistics().total_nodes);
    }
}

#[test]
fn test_pruning_matches_plain_minimax_tictactoe() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(6);
    for _ in 0..30 {
        let (mut board, side) = random_reachable(TicTacToeState::new(), &mut rng);
        if board.is_full() || board.count(Side::First) + board.count(Side::Second) < 2 {
            continue;
        }
        let a = Minimax::new(false).choose_move(&mut board, side, None).unwrap();
        let b = Minimax::new(true).choose_move(&mut board, side, None).unwrap();
        assert_eq!(a, b, "\n{}", board);
    }
}

#[test]
fn test_place_undo_round_trip() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    for _ in 0..100 {
        let (mut board, side) = random_reachable(Connect4State::default(), &mut rng);
        for mv in board.possible_moves() {
            let before = board.clone();
            let loc = board.place(mv, side).unwrap();
            board.undo(loc);
            assert_eq!(board, before);
        }
    }
}

#[test]
fn test_tictactoe_takes_the_win() {
    let mut board = TicTacToeState::from_layout("XX_ OO_ ___").unwrap();
    let result = Minimax::new(false).choose_move(&mut board, Side::Second, None).unwrap();
    assert_eq!(result.mv, TicTacToeMove(5));
    board.place(result.mv, Side::Second).unwrap();
    assert_eq!(board.winner(), Some(Side::Second));
}

#[test]
fn test_tictactoe_blocks() {
    let mut board = TicTacToeState::from_layout("XX_ _O_ ___").unwrap();
    let result = Minimax::new(false).choose_move(&mut board, Side::Second, None).unwrap();
    assert_eq!(result.mv, TicTacToeMove(2));
}

#[test]
fn test_tictactoe_self_play_is_a_draw() {
    let mut board = TicTacToeState::new();
    let mut engine = Minimax::from_config(&SearchConfig::exhaustive());
    let mut side = Side::First;
    while !board.is_terminal() {
        let result = engine.choose_move(&mut board, side, None).unwrap();
        assert_eq!(result.score, 0);
        board.place(result.mv, side).unwrap();
        side = side.opponent();
    }
    assert!(board.is_draw(), "\n{}", board);
}

#[test]
fn test_connect4_empty_board_opens_center() {
    let mut board = Connect4State::default();
    let result = Minimax::default().choose_move(&mut board, Side::Second, Some(5)).unwrap();
    assert_eq!(result, SearchResult { mv: Connect4Move(3), score: 0 });
}

#[test]
fn test_full_board_is_draw_and_unsearchable() {
    let mut board = Connect4State::from_rows(&[
        "XXOOXXO",
        "OOXXOOX",
        "XXOOXXO",
        "OOXXOOX",
        "XXOOXXO",
        "OOXXOOX",
    ])
    .unwrap();
    assert!(board.is_draw());
    assert_eq!(
        Minimax::default().choose_move(&mut board, Side::First, Some(5)),
        Err(GameError::NoLegalMove)
    );

    let mut board = TicTacToeState::from_layout("XOX XOO OXX").unwrap();
    assert!(board.is_draw());
    assert_eq!(
        Minimax::new(false).choose_move(&mut board, Side::Second, None),
        Err(GameError::NoLegalMove)
    );
}

#[test]
fn test_depth_horizon_scores_neutral() {
    // Extending the open two makes a double threat that only pays off
    // two plies later.
    let mut board = Connect4State::from_rows(&[
        ".......",
        ".......",
        ".......",
        ".......",
        "......O",
        ".XX...O",
    ])
    .unwrap();
    let shallow = Minimax::default().choose_move(&mut board, Side::First, Some(0)).unwrap();
    assert_eq!(shallow.score, 0);
    let deep = Minimax::default().choose_move(&mut board, Side::First, Some(2)).unwrap();
    assert_eq!(deep.score, 997);
}
