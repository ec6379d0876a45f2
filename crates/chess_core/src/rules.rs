//! Movement templates per piece kind.
//!
//! Templates are written in the moving side's own frame: `row` grows towards
//! the opponent, `column` grows to the mover's right. The move generator maps
//! them to absolute cells.

use crate::types::{CellNode, PieceKind};

/// One straight segment: a unit direction walked `steps` times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearPath {
    pub direction: CellNode,
    pub steps: u8,
}

impl LinearPath {
    pub fn new(d_row: i8, d_column: i8, steps: u8) -> Self {
        Self {
            direction: CellNode::new(d_row, d_column),
            steps,
        }
    }

    /// Cumulative offset after `step` steps (1-based).
    pub fn node(&self, step: u8) -> CellNode {
        self.direction.scaled(step as i8)
    }

    /// Offsets for steps `1..=steps`.
    pub fn nodes(&self) -> impl Iterator<Item = CellNode> + '_ {
        (1..=self.steps).map(move |i| self.node(i))
    }
}

/// Segments walked nose-to-tail, e.g. a knight's bent jump.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChessPath {
    segments: Vec<LinearPath>,
    total_steps: u8,
}

impl ChessPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, d_row: i8, d_column: i8, steps: u8) -> Self {
        self.segments.push(LinearPath::new(d_row, d_column, steps));
        self.total_steps += steps;
        self
    }

    pub fn segments(&self) -> &[LinearPath] {
        &self.segments
    }

    pub fn total_steps(&self) -> u8 {
        self.total_steps
    }

    /// Cumulative offset at `step` (1-based) counting across segments.
    pub fn node(&self, step: u8) -> CellNode {
        let mut acc = CellNode::default();
        let mut left = step;
        for seg in &self.segments {
            if left <= seg.steps {
                return acc + seg.node(left);
            }
            acc = acc + seg.node(seg.steps);
            left -= seg.steps;
        }
        acc
    }

    pub fn final_node(&self) -> CellNode {
        self.node(self.total_steps)
    }

    /// Offsets for steps `1..=total_steps`.
    pub fn nodes(&self) -> impl Iterator<Item = CellNode> + '_ {
        (1..=self.total_steps).map(move |i| self.node(i))
    }

    fn single(d_row: i8, d_column: i8, steps: u8) -> Self {
        Self::new().then(d_row, d_column, steps)
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, -1), (-1, 1), (-1, -1), (1, 1)];

/// Immutable table of templates per piece kind.
#[derive(Clone, Debug)]
pub struct RuleCatalog {
    paths: [Vec<ChessPath>; 6],
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleCatalog {
    pub fn new() -> Self {
        let mut paths: [Vec<ChessPath>; 6] = Default::default();

        // Forward double step first; the generator relies on that order.
        paths[PieceKind::Pawn.idx()] = vec![
            ChessPath::single(1, 0, 2),
            ChessPath::single(1, -1, 1),
            ChessPath::single(1, 1, 1),
        ];

        paths[PieceKind::Rook.idx()] = ORTHOGONAL
            .iter()
            .map(|&(r, c)| ChessPath::single(r, c, 8))
            .collect();

        paths[PieceKind::Bishop.idx()] = DIAGONAL
            .iter()
            .map(|&(r, c)| ChessPath::single(r, c, 8))
            .collect();

        let mut knight = Vec::with_capacity(8);
        for (first, second) in [(1, 2), (2, 1)] {
            for dr in [-1, 1] {
                for dc in [1, -1] {
                    knight.push(ChessPath::new().then(dr, 0, first).then(0, dc, second));
                }
            }
        }
        paths[PieceKind::Knight.idx()] = knight;

        paths[PieceKind::Queen.idx()] = ORTHOGONAL
            .iter()
            .chain(DIAGONAL.iter())
            .map(|&(r, c)| ChessPath::single(r, c, 8))
            .collect();

        paths[PieceKind::King.idx()] = ORTHOGONAL
            .iter()
            .chain(DIAGONAL.iter())
            .map(|&(r, c)| ChessPath::single(r, c, 1))
            .collect();

        Self { paths }
    }

    pub fn paths(&self, kind: PieceKind) -> &[ChessPath] {
        &self.paths[kind.idx()]
    }

    /// The pawn's forward template is the only non-diagonal one.
    pub fn is_pawn_advance(path: &ChessPath) -> bool {
        path.segments().iter().all(|s| s.direction.column == 0)
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
