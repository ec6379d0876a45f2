//! Textual board seeding.
//!
//! A FEN-like piece placement: ranks may be separated by `/`, digits `1`-`8`
//! stand for runs of empty cells, lowercase letters are White pieces and
//! uppercase letters Black ones. Character `i` of the expanded string is cell
//! index `i`, so the first rank written is row 0.

use crate::board::{Board, default_count};
use crate::error::LayoutError;
use crate::types::*;

const EMPTY: char = '*';

/// Expand digit runs to `*` placeholders and drop rank separators.
pub fn expand_layout(input: &str) -> Result<String, LayoutError> {
    let mut out = String::with_capacity(CELLS);
    for ch in input.chars() {
        match ch {
            '/' => {}
            '1'..='8' => {
                let run = ch as usize - '0' as usize;
                out.extend(std::iter::repeat_n(EMPTY, run));
            }
            c if PieceKind::from_symbol(c).is_some() => out.push(c),
            c => return Err(LayoutError::UnknownSymbol(c)),
        }
    }
    Ok(out)
}

impl Board {
    /// Build a board from a textual layout. The per-color piece counts must
    /// match the default distribution.
    pub fn from_layout(input: &str) -> Result<Board, LayoutError> {
        let expanded = expand_layout(input)?;
        let len = expanded.chars().count();
        if len != CELLS {
            return Err(LayoutError::WrongLength(len));
        }

        let mut board = Board::empty();
        for (idx, ch) in expanded.chars().enumerate() {
            if let Some((kind, color)) = PieceKind::from_symbol(ch) {
                board.create_piece(kind, color, CellNode::from_index(idx));
            }
        }

        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                let expected = default_count(kind);
                let found = board.count(color, kind);
                if found != expected {
                    return Err(LayoutError::PieceCount {
                        color,
                        kind,
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(board)
    }

    /// Replace this board with a parsed layout. On error the board is left
    /// untouched.
    pub fn load_layout(&mut self, input: &str) -> Result<(), LayoutError> {
        *self = Board::from_layout(input)?;
        Ok(())
    }

    /// Render the board in the same textual format, ranks joined by `/`.
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(CELLS + 8);
        for (rank, row) in self.cell_slots().chunks(SIZE as usize).enumerate() {
            if rank > 0 {
                out.push('/');
            }
            let mut run = 0u8;
            for slot in row {
                match slot {
                    Some(id) => {
                        if run > 0 {
                            out.push((b'0' + run) as char);
                            run = 0;
                        }
                        let p = self.piece(*id);
                        out.push(p.kind.symbol(p.color));
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                out.push((b'0' + run) as char);
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod layout_tests;
