use super::*;
use chess_core::{MoveFilter, PieceKind};

use crate::decision::AiLevel;

/// White's queen faces the black king down an open file.
const KING_HANGS: &str = "rnbqkbnr/ppp1pppp/p7/8/8/P7/PPP1PPPP/RNBKQBNR";

fn quick(level: u8, seed: u64) -> GameConfig {
    GameConfig {
        movement_time: 0,
        level_ai: AiLevel::try_from(level).unwrap(),
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn test_new_game_starts_with_white() {
    let game = Game::new(quick(0, 1)).unwrap();
    assert_eq!(game.active_color(), Color::White);
    assert_eq!(game.player(Color::White).state(), PlayerState::WaitForPieceDecision);
    assert_eq!(game.player(Color::Black).state(), PlayerState::EndTurn);
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert_eq!(game.games_played(), 1);
    assert_eq!(game.pieces().count(), 32);
}

#[test]
fn test_bad_layout_rejected() {
    let config = GameConfig {
        layout: Some("rnbqkbnr/ppppppp1/8/8/8/8/PPPPPPPP/RNBQKBNR".into()),
        ..Default::default()
    };
    assert!(matches!(Game::new(config), Err(ConfigError::Layout(_))));
}

#[test]
fn test_four_ticks_per_move_and_turns_alternate() {
    let mut game = Game::new(quick(0, 3)).unwrap();
    for _ in 0..3 {
        game.update(16);
        assert_eq!(game.active_color(), Color::White);
        assert_eq!(game.turn(), 0);
    }
    game.update(16);
    assert_eq!(game.turn(), 1);
    assert_eq!(game.active_color(), Color::Black);
    assert_eq!(game.player(Color::White).state(), PlayerState::EndTurn);
    assert_eq!(game.player(Color::Black).state(), PlayerState::WaitForPieceDecision);
}

#[test]
fn test_king_capture_wins() {
    let config = GameConfig {
        layout: Some(KING_HANGS.into()),
        ..quick(4, 1)
    };
    let mut game = Game::new(config).unwrap();
    for _ in 0..4 {
        game.update(16);
    }
    assert_eq!(game.outcome(), Outcome::Won(Color::White));
    assert_eq!(game.outcome().winner(), Some(Color::White));
    assert_eq!(game.player(Color::White).state(), PlayerState::Win);
    assert_eq!(game.player(Color::White).captured(), &[PieceKind::King]);

    let record = game.history()[0];
    assert_eq!(record.kind, PieceKind::Queen);
    assert_eq!(record.to, CellNode::new(7, 3));
    assert_eq!(record.captured, Some(PieceKind::King));

    // finished games stay put
    game.update(16);
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.submit_move(0, CellNode::new(2, 0)), Err(MoveError::GameOver));
}

#[test]
fn test_infinite_loop_restarts() {
    let config = GameConfig {
        layout: Some(KING_HANGS.into()),
        infinite_loop: true,
        ..quick(4, 1)
    };
    let mut game = Game::new(config).unwrap();
    for _ in 0..4 {
        game.update(16);
    }
    assert_eq!(game.completed(), &[Outcome::Won(Color::White)]);
    assert_eq!(game.games_played(), 2);
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert!(game.history().is_empty());
    assert_eq!(game.board().to_layout(), KING_HANGS);
    assert_eq!(game.active_color(), Color::White);
}

#[test]
fn test_no_legal_moves_ends_in_stalemate() {
    let mut game = Game::new(quick(0, 1)).unwrap();
    let mut board = Board::empty();
    board.create_piece(PieceKind::Pawn, Color::White, CellNode::new(3, 3));
    board.create_piece(PieceKind::Pawn, Color::Black, CellNode::new(4, 3));
    game.initial = board;
    game.reset_game();

    game.update(16);
    assert_eq!(game.outcome(), Outcome::Stalemate(Color::White));
    assert_eq!(game.outcome().winner(), None);
    assert_eq!(game.completed().len(), 1);
}

#[test]
fn test_no_legal_moves_in_check_is_checkmate() {
    let mut game = Game::new(quick(0, 1)).unwrap();
    let mut board = Board::empty();
    board.create_piece(PieceKind::King, Color::White, CellNode::new(0, 0));
    board.create_piece(PieceKind::Rook, Color::White, CellNode::new(0, 1));
    board.create_piece(PieceKind::Pawn, Color::White, CellNode::new(0, 2));
    for row in 1..8 {
        board.create_piece(PieceKind::Pawn, Color::White, CellNode::new(row, 0));
        board.create_piece(PieceKind::Pawn, Color::White, CellNode::new(row, 1));
    }
    // the knight checks a king walled in by its own pawns
    board.create_piece(PieceKind::Knight, Color::Black, CellNode::new(1, 2));
    board.create_piece(PieceKind::King, Color::Black, CellNode::new(7, 7));
    game.initial = board;
    game.reset_game();

    game.update(16);
    assert_eq!(game.outcome(), Outcome::Checkmated(Color::White));
    assert_eq!(game.outcome().winner(), Some(Color::Black));
    assert_eq!(game.completed(), &[Outcome::Checkmated(Color::White)]);
}

#[test]
fn test_human_side_waits_for_submit() {
    let config = GameConfig {
        human_players: 1,
        ..quick(0, 2)
    };
    let mut game = Game::new(config).unwrap();
    for _ in 0..10 {
        game.update(16);
    }
    assert_eq!(game.turn(), 0);

    let (piece, dests) = game
        .player(Color::White)
        .possible()
        .iter()
        .next()
        .map(|(id, d)| (*id, d.clone()))
        .unwrap();
    game.submit_move(piece, dests[0]).unwrap();
    for _ in 0..4 {
        game.update(16);
    }
    assert_eq!(game.turn(), 1);
    assert_eq!(game.board().piece(piece).cell(), dests[0]);

    // Black is the AI and cannot be driven from outside
    assert_eq!(
        game.submit_move(piece, dests[0]),
        Err(MoveError::NotHuman(Color::Black))
    );
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut game = Game::new(quick(4, seed)).unwrap();
        for _ in 0..200 {
            game.update(16);
        }
        game.history().to_vec()
    };
    assert_eq!(play(11), play(11));
}

#[test]
fn test_restarted_games_are_seeded_by_game_number() {
    let play = |game: &mut Game| {
        for _ in 0..40 {
            game.update(16);
        }
        game.history().to_vec()
    };
    let mut first = Game::new(quick(0, 5)).unwrap();
    assert_eq!(first.game_seed(), Some(6));
    let opening = play(&mut first);

    let mut restarted = Game::new(quick(0, 5)).unwrap();
    restarted.reset_game();
    assert_eq!(restarted.games_played(), 2);
    assert_eq!(restarted.game_seed(), Some(7));

    // game two of seed 5 is game one of seed 6
    let mut fresh = Game::new(quick(0, 6)).unwrap();
    assert_eq!(fresh.game_seed(), Some(7));
    let replay = play(&mut restarted);
    assert_eq!(replay, play(&mut fresh));
    assert_ne!(replay, opening);
}

#[test]
fn test_every_committed_move_was_legal() {
    let mut game = Game::new(quick(2, 8)).unwrap();
    let rules = RuleCatalog::new();
    for _ in 0..30 {
        let mut before = game.position().clone();
        let moved = game.history().len();
        for _ in 0..4 {
            game.update(16);
        }
        if game.outcome().is_over() {
            break;
        }
        let record = game.history()[moved];
        let legal =
            Arbiter::new(&mut before, &rules).possible_destinations(record.piece, MoveFilter::ALL);
        assert!(legal.contains(&record.to));
    }
}

#[test]
fn test_read_interface() {
    assert_eq!(Game::name_piece(PieceKind::Knight), "KNIGHT");
    assert!(Game::is_dark_cell(0, 0));
    assert!(!Game::is_dark_cell(0, 1));
}
