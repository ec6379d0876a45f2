use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Board edge length.
pub const SIZE: i8 = 8;
/// Number of cells on the board.
pub const CELLS: usize = 64;

/// Stable handle of a piece inside a [`Board`](crate::Board).
pub type PieceId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Row direction of "forward" for this side.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Black => "BLACK",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Bishop,
    Knight,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    /// Trade value used by every hierarchy comparison of the AI.
    pub fn importance(self) -> u8 {
        match self {
            PieceKind::King => 3,
            PieceKind::Queen => 2,
            PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight => 1,
            PieceKind::Pawn => 0,
        }
    }

    /// Diagnostic name, as printed in game logs.
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "PAWN",
            PieceKind::Rook => "ROOK",
            PieceKind::Bishop => "BISHOP",
            PieceKind::Knight => "KNIGHT",
            PieceKind::Queen => "QUEEN",
            PieceKind::King => "KING",
        }
    }

    /// Layout letter: lowercase for White, uppercase for Black.
    pub fn symbol(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c,
            Color::Black => c.to_ascii_uppercase(),
        }
    }

    pub fn from_symbol(ch: char) -> Option<(PieceKind, Color)> {
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if ch.is_ascii_lowercase() {
            Color::White
        } else {
            Color::Black
        };
        Some((kind, color))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (row, column) pair. Absolute when it names a cell, relative when it is a
/// path offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellNode {
    pub row: i8,
    pub column: i8,
}

impl CellNode {
    pub const fn new(row: i8, column: i8) -> Self {
        Self { row, column }
    }

    pub fn is_inside(self) -> bool {
        (0..SIZE).contains(&self.row) && (0..SIZE).contains(&self.column)
    }

    /// Cell index `row * 8 + column`, `None` outside the board.
    pub fn index(self) -> Option<usize> {
        if self.is_inside() {
            Some(self.row as usize * SIZE as usize + self.column as usize)
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < CELLS, "cell index {index} out of range");
        Self::new((index / SIZE as usize) as i8, (index % SIZE as usize) as i8)
    }

    /// Offset scaled by `k` steps.
    pub fn scaled(self, k: i8) -> Self {
        Self::new(self.row * k, self.column * k)
    }
}

impl Add for CellNode {
    type Output = CellNode;
    fn add(self, rhs: CellNode) -> CellNode {
        CellNode::new(self.row + rhs.row, self.column + rhs.column)
    }
}

impl Sub for CellNode {
    type Output = CellNode;
    fn sub(self, rhs: CellNode) -> CellNode {
        CellNode::new(self.row - rhs.row, self.column - rhs.column)
    }
}

impl fmt::Display for CellNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub row: i8,
    pub column: i8,
}

impl Piece {
    pub fn cell(&self) -> CellNode {
        CellNode::new(self.row, self.column)
    }

    pub fn importance(&self) -> u8 {
        self.kind.importance()
    }
}
