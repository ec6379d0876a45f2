use crate::types::{Color, PieceKind};

/// Why a textual layout was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout expands to {0} cells, expected 64")]
    WrongLength(usize),

    #[error("unexpected character {0:?} in layout")]
    UnknownSymbol(char),

    #[error("layout has {found} {color} {kind} piece(s), expected {expected}")]
    PieceCount {
        color: Color,
        kind: PieceKind,
        expected: usize,
        found: usize,
    },
}
