use super::*;

#[test]
fn test_default_layout() {
    let board = Board::new();
    assert_eq!(board.len(), 32);
    assert!(board.is_consistent());

    for color in [Color::White, Color::Black] {
        for kind in PieceKind::ALL {
            assert_eq!(board.count(color, kind), default_count(kind), "{color} {kind}");
        }
    }

    // White fills rows 0-1, Black mirrors through 63 - index
    let wq = board.piece_at(CellNode::new(0, 3)).unwrap();
    assert_eq!((wq.kind, wq.color), (PieceKind::Queen, Color::White));
    let bq = board.piece_at(CellNode::new(7, 4)).unwrap();
    assert_eq!((bq.kind, bq.color), (PieceKind::Queen, Color::Black));
    let bk = board.piece_at(CellNode::new(7, 3)).unwrap();
    assert_eq!((bk.kind, bk.color), (PieceKind::King, Color::Black));
    assert!(board.pieces_of(Color::Black).all(|p| p.row >= 6));
    assert!(!board.exists_piece_at(CellNode::new(4, 4)));
}

#[test]
fn test_ids_are_unique_and_monotonic() {
    let mut board = Board::empty();
    let a = board.create_piece(PieceKind::Rook, Color::White, CellNode::new(0, 0));
    let b = board.create_piece(PieceKind::Rook, Color::Black, CellNode::new(7, 7));
    board.remove_piece(a);
    let c = board.create_piece(PieceKind::Queen, Color::White, CellNode::new(3, 3));
    assert!(a < b && b < c);
    assert!(!board.exists_piece(a));
}

#[test]
fn test_move_keeps_index_in_sync() {
    let mut board = Board::new();
    let pawn = board.piece_at(CellNode::new(1, 4)).unwrap().id;
    board.move_piece_to(pawn, CellNode::new(3, 4));

    assert!(!board.exists_piece_at(CellNode::new(1, 4)));
    assert_eq!(board.piece_at(CellNode::new(3, 4)).unwrap().id, pawn);
    assert_eq!(board.piece(pawn).cell(), CellNode::new(3, 4));
    assert!(board.is_consistent());
}

#[test]
fn test_remove_then_restore_round_trip() {
    let mut board = Board::new();
    let before = board.clone();
    let knight = board.piece_at(CellNode::new(7, 6)).unwrap().id;

    let removed = board.remove_piece(knight);
    assert!(!board.exists_piece(knight));
    assert!(!board.exists_piece_at(removed.cell()));
    assert!(board.is_consistent());

    board.restore_piece(removed.id, removed.color, removed.kind, removed.cell());
    assert_eq!(board, before);
}

#[test]
#[should_panic(expected = "already on board")]
fn test_double_restore_panics() {
    let mut board = Board::new();
    let p = *board.piece_at(CellNode::new(1, 0)).unwrap();
    board.restore_piece(p.id, p.color, p.kind, CellNode::new(4, 4));
}

#[test]
#[should_panic(expected = "cannot land")]
fn test_move_onto_occupied_cell_panics() {
    let mut board = Board::new();
    let rook = board.piece_at(CellNode::new(0, 0)).unwrap().id;
    board.move_piece_to(rook, CellNode::new(1, 0));
}

#[test]
#[should_panic(expected = "outside the board")]
fn test_create_outside_board_panics() {
    let mut board = Board::empty();
    board.create_piece(PieceKind::Pawn, Color::White, CellNode::new(8, 0));
}

#[test]
fn test_existence_queries_off_board() {
    let board = Board::new();
    assert!(!board.exists_piece_at(CellNode::new(-1, 0)));
    assert!(!board.exists_piece_at(CellNode::new(0, 8)));
    assert!(board.piece_at(CellNode::new(9, 9)).is_none());
}

#[test]
fn test_clear_empties_index() {
    let mut board = Board::new();
    board.clear();
    assert!(board.is_empty());
    assert!((0..CELLS).all(|i| !board.exists_piece_at(CellNode::from_index(i))));
    assert!(board.is_consistent());
}

#[test]
fn test_dark_cells() {
    assert!(Board::is_dark_cell(0, 0));
    assert!(!Board::is_dark_cell(0, 1));
    assert!(Board::is_dark_cell(7, 7));
    assert!(!Board::is_dark_cell(7, 6));
}

#[test]
fn test_double_step_record() {
    let mut pos = Position::startpos();
    assert!(!pos.has_used_double_step(0));
    pos.record_double_step(0);
    assert!(pos.has_used_double_step(0));
    assert_eq!(pos.double_stepped().collect::<Vec<_>>(), vec![0]);
}
