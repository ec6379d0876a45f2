use std::collections::BTreeMap;

use crate::{
    board::{Board, Position},
    rules::{ChessPath, RuleCatalog},
    types::*,
};

/// Which destinations a generator call yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveFilter {
    /// Only cells holding an enemy piece.
    pub only_capture: bool,
    /// Only cells the piece cannot be captured on right after moving.
    pub only_safe: bool,
}

impl MoveFilter {
    pub const ALL: MoveFilter = MoveFilter {
        only_capture: false,
        only_safe: false,
    };
    pub const CAPTURES: MoveFilter = MoveFilter {
        only_capture: true,
        only_safe: false,
    };
    pub const SAFE: MoveFilter = MoveFilter {
        only_capture: false,
        only_safe: true,
    };
    pub const SAFE_CAPTURES: MoveFilter = MoveFilter {
        only_capture: true,
        only_safe: true,
    };
}

/// Destinations per piece id, only pieces with at least one entry.
pub type Destinations = BTreeMap<PieceId, Vec<CellNode>>;

/// Rules applied to a position for the span of one query.
///
/// Safety probes mutate the board and roll it back before returning, which is
/// why the position is borrowed mutably even for read-only questions.
pub struct Arbiter<'a> {
    pub(crate) pos: &'a mut Position,
    pub(crate) rules: &'a RuleCatalog,
}

enum CellState {
    Empty,
    Friend,
    Enemy,
}

impl<'a> Arbiter<'a> {
    pub fn new(pos: &'a mut Position, rules: &'a RuleCatalog) -> Self {
        Self { pos, rules }
    }

    pub fn board(&self) -> &Board {
        &self.pos.board
    }

    pub fn position(&self) -> &Position {
        self.pos
    }

    pub fn position_mut(&mut self) -> &mut Position {
        self.pos
    }

    /// Legal destinations of one piece, in template order.
    pub fn possible_destinations(&mut self, id: PieceId, filter: MoveFilter) -> Vec<CellNode> {
        let piece = *self.pos.board.piece(id);
        let rules = self.rules;
        let mut out = Vec::new();
        for path in rules.paths(piece.kind) {
            match piece.kind {
                PieceKind::Pawn => self.walk_pawn(&piece, path, filter, &mut out),
                PieceKind::Knight => self.jump(&piece, path, filter, &mut out),
                _ => self.slide(&piece, path, filter, &mut out),
            }
        }
        out
    }

    /// Destinations for every piece of `color` that has any.
    pub fn possible_destinations_for_side(
        &mut self,
        color: Color,
        filter: MoveFilter,
    ) -> Destinations {
        let ids: Vec<PieceId> = self.pos.board.pieces_of(color).map(|p| p.id).collect();
        let mut out = Destinations::new();
        for id in ids {
            let dests = self.possible_destinations(id, filter);
            if !dests.is_empty() {
                out.insert(id, dests);
            }
        }
        out
    }

    pub fn has_legal_moves(&mut self, color: Color) -> bool {
        let ids: Vec<PieceId> = self.pos.board.pieces_of(color).map(|p| p.id).collect();
        ids.into_iter()
            .any(|id| !self.possible_destinations(id, MoveFilter::ALL).is_empty())
    }

    fn walk_pawn(
        &mut self,
        piece: &Piece,
        path: &ChessPath,
        filter: MoveFilter,
        out: &mut Vec<CellNode>,
    ) {
        if RuleCatalog::is_pawn_advance(path) {
            if filter.only_capture || self.pos.has_used_double_step(piece.id) {
                return;
            }
            for offset in path.nodes() {
                let Some(cell) = absolute(piece, offset) else {
                    break;
                };
                if !matches!(self.cell_state(piece, cell), CellState::Empty) {
                    break;
                }
                self.push_if_safe(piece, cell, filter, out);
            }
        } else {
            // Diagonals only ever capture.
            for offset in path.nodes() {
                let Some(cell) = absolute(piece, offset) else {
                    break;
                };
                if matches!(self.cell_state(piece, cell), CellState::Enemy) {
                    self.push_if_safe(piece, cell, filter, out);
                }
            }
        }
    }

    fn jump(
        &mut self,
        piece: &Piece,
        path: &ChessPath,
        filter: MoveFilter,
        out: &mut Vec<CellNode>,
    ) {
        let Some(cell) = absolute(piece, path.final_node()) else {
            return;
        };
        match self.cell_state(piece, cell) {
            CellState::Friend => {}
            CellState::Empty if filter.only_capture => {}
            CellState::Empty | CellState::Enemy => self.push_if_safe(piece, cell, filter, out),
        }
    }

    fn slide(
        &mut self,
        piece: &Piece,
        path: &ChessPath,
        filter: MoveFilter,
        out: &mut Vec<CellNode>,
    ) {
        for offset in path.nodes() {
            let Some(cell) = absolute(piece, offset) else {
                break;
            };
            match self.cell_state(piece, cell) {
                CellState::Friend => break,
                CellState::Enemy => {
                    self.push_if_safe(piece, cell, filter, out);
                    break;
                }
                CellState::Empty => {
                    if !filter.only_capture {
                        self.push_if_safe(piece, cell, filter, out);
                    }
                }
            }
        }
    }

    fn push_if_safe(
        &mut self,
        piece: &Piece,
        cell: CellNode,
        filter: MoveFilter,
        out: &mut Vec<CellNode>,
    ) {
        if !filter.only_safe || self.is_safe_to_move_to(piece.id, cell) {
            out.push(cell);
        }
    }

    fn cell_state(&self, piece: &Piece, cell: CellNode) -> CellState {
        match self.pos.board.piece_at(cell) {
            None => CellState::Empty,
            Some(other) if other.color == piece.color => CellState::Friend,
            Some(_) => CellState::Enemy,
        }
    }
}

/// Map a template offset to an absolute cell. Black's frame is the board
/// rotated half a turn, so both coordinates flip.
fn absolute(piece: &Piece, offset: CellNode) -> Option<CellNode> {
    let sign = piece.color.forward();
    let cell = piece.cell() + offset.scaled(sign);
    cell.is_inside().then_some(cell)
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
