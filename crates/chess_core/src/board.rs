use std::collections::{BTreeMap, BTreeSet};

use crate::types::*;

/// Default cell indexes per piece kind, White side. Black mirrors them through
/// `63 - index`.
const DEFAULT_LAYOUT: [(PieceKind, &[usize]); 6] = [
    (PieceKind::Pawn, &[8, 9, 10, 11, 12, 13, 14, 15]),
    (PieceKind::Rook, &[0, 7]),
    (PieceKind::Knight, &[1, 6]),
    (PieceKind::Bishop, &[2, 5]),
    (PieceKind::Queen, &[3]),
    (PieceKind::King, &[4]),
];

/// How many pieces of `kind` each side starts with.
pub fn default_count(kind: PieceKind) -> usize {
    DEFAULT_LAYOUT
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, idxs)| idxs.len())
        .unwrap_or(0)
}

/// Owns every piece plus the cell index. The two always agree: a cell holds
/// an id iff that piece sits on exactly that cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pieces: BTreeMap<PieceId, Piece>,
    cells: [Option<PieceId>; CELLS],
    next_id: PieceId,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board in the default starting layout.
    pub fn new() -> Self {
        let mut b = Self::empty();
        for (kind, idxs) in DEFAULT_LAYOUT {
            for &idx in idxs {
                b.create_piece(kind, Color::White, CellNode::from_index(idx));
                b.create_piece(kind, Color::Black, CellNode::from_index(CELLS - 1 - idx));
            }
        }
        b
    }

    pub fn empty() -> Self {
        Self {
            pieces: BTreeMap::new(),
            cells: [None; CELLS],
            next_id: 0,
        }
    }

    /// Drop every piece. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.pieces.clear();
        self.cells = [None; CELLS];
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn create_piece(&mut self, kind: PieceKind, color: Color, cell: CellNode) -> PieceId {
        let idx = Self::cell_index(cell);
        if let Some(other) = self.cells[idx] {
            panic!("cannot create {kind} at {cell}: occupied by piece {other}");
        }
        let id = self.next_id;
        self.next_id += 1;
        self.pieces.insert(
            id,
            Piece {
                id,
                kind,
                color,
                row: cell.row,
                column: cell.column,
            },
        );
        self.cells[idx] = Some(id);
        id
    }

    /// Remove a live piece and hand it back to the caller.
    pub fn remove_piece(&mut self, id: PieceId) -> Piece {
        let piece = self
            .pieces
            .remove(&id)
            .unwrap_or_else(|| panic!("remove_piece: piece {id} not on board"));
        let idx = Self::cell_index(piece.cell());
        if self.cells[idx] != Some(id) {
            panic!(
                "remove_piece: cell {} does not hold piece {id}",
                piece.cell()
            );
        }
        self.cells[idx] = None;
        piece
    }

    /// Reinsert a previously removed piece under its original id.
    pub fn restore_piece(&mut self, id: PieceId, color: Color, kind: PieceKind, cell: CellNode) {
        if id >= self.next_id {
            panic!("restore_piece: id {id} was never issued");
        }
        if self.pieces.contains_key(&id) {
            panic!("restore_piece: piece {id} is already on board");
        }
        let idx = Self::cell_index(cell);
        if let Some(other) = self.cells[idx] {
            panic!("restore_piece: cell {cell} occupied by piece {other}");
        }
        self.pieces.insert(
            id,
            Piece {
                id,
                kind,
                color,
                row: cell.row,
                column: cell.column,
            },
        );
        self.cells[idx] = Some(id);
    }

    /// Move a live piece onto an empty cell. Captures are the caller's job.
    pub fn move_piece_to(&mut self, id: PieceId, cell: CellNode) {
        let to = Self::cell_index(cell);
        if let Some(other) = self.cells[to] {
            if other != id {
                panic!("move_piece_to: piece {id} cannot land on {cell}, piece {other} is there");
            }
        }
        let piece = self
            .pieces
            .get_mut(&id)
            .unwrap_or_else(|| panic!("move_piece_to: piece {id} not on board"));
        let from = Self::cell_index(piece.cell());
        piece.row = cell.row;
        piece.column = cell.column;
        self.cells[from] = None;
        self.cells[to] = Some(id);
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        self.pieces
            .get(&id)
            .unwrap_or_else(|| panic!("piece {id} not on board"))
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn exists_piece(&self, id: PieceId) -> bool {
        self.pieces.contains_key(&id)
    }

    /// Piece on `cell`, `None` when empty or off the board.
    pub fn piece_at(&self, cell: CellNode) -> Option<&Piece> {
        let id = self.cells[cell.index()?]?;
        Some(self.piece(id))
    }

    pub fn exists_piece_at(&self, cell: CellNode) -> bool {
        cell.index().is_some_and(|idx| self.cells[idx].is_some())
    }

    /// All live pieces in ascending id order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(move |p| p.color == color)
    }

    pub fn king_of(&self, color: Color) -> Option<&Piece> {
        self.pieces_of(color).find(|p| p.kind == PieceKind::King)
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces_of(color).filter(|p| p.kind == kind).count()
    }

    /// Checkerboard coloring for renderers.
    pub fn is_dark_cell(row: i8, column: i8) -> bool {
        ((row % 2) + (column % 2)) % 2 == 0
    }

    /// Verify that the piece map and the cell index describe the same board.
    pub fn is_consistent(&self) -> bool {
        let indexed = self.cells.iter().enumerate().all(|(idx, slot)| match slot {
            Some(id) => self
                .pieces
                .get(id)
                .is_some_and(|p| p.cell() == CellNode::from_index(idx)),
            None => true,
        });
        let placed = self
            .pieces
            .values()
            .all(|p| p.cell().index().is_some_and(|idx| self.cells[idx] == Some(p.id)));
        indexed && placed
    }

    pub(crate) fn cell_slots(&self) -> &[Option<PieceId>; CELLS] {
        &self.cells
    }

    fn cell_index(cell: CellNode) -> usize {
        cell.index()
            .unwrap_or_else(|| panic!("cell {cell} is outside the board"))
    }
}

/// Board plus the rule state that outlives a single move: which pawns have
/// spent their double step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    double_stepped: BTreeSet<PieceId>,
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(Board::new())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            double_stepped: BTreeSet::new(),
        }
    }

    pub fn has_used_double_step(&self, id: PieceId) -> bool {
        self.double_stepped.contains(&id)
    }

    pub fn record_double_step(&mut self, id: PieceId) {
        self.double_stepped.insert(id);
    }

    pub fn double_stepped(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.double_stepped.iter().copied()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
