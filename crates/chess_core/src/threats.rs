//! Threat analysis built on the move generator.
//!
//! Every question that needs a hypothetical move goes through
//! [`Arbiter::with_hypothetical_move`], which restores the board exactly
//! before returning.

use crate::{movegen::{Arbiter, MoveFilter}, types::*};

impl Arbiter<'_> {
    /// Play `id` to `cell` (capturing an enemy there), run `f`, then undo.
    pub fn with_hypothetical_move<T>(
        &mut self,
        id: PieceId,
        cell: CellNode,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let piece = *self.pos.board.piece(id);
        let captured = match self.pos.board.piece_at(cell) {
            Some(other) if other.color != piece.color => Some(*other),
            _ => None,
        };
        if let Some(victim) = captured {
            self.pos.board.remove_piece(victim.id);
        }
        self.pos.board.move_piece_to(id, cell);

        let result = f(self);

        self.pos.board.move_piece_to(id, piece.cell());
        if let Some(victim) = captured {
            self.pos
                .board
                .restore_piece(victim.id, victim.color, victim.kind, victim.cell());
        }
        result
    }

    /// Whether `id` standing on `cell` could not be captured right away.
    pub fn is_safe_to_move_to(&mut self, id: PieceId, cell: CellNode) -> bool {
        let enemy = self.pos.board.piece(id).color.other();
        self.with_hypothetical_move(id, cell, |arb| {
            // Captures only and no safety filter, or the probe would recurse.
            !arb.possible_destinations_for_side(enemy, MoveFilter::CAPTURES)
                .values()
                .any(|dests| dests.contains(&cell))
        })
    }

    /// Opposing pieces that can capture `victim` where it stands.
    pub fn possible_assassins_of(&mut self, victim: PieceId) -> Vec<PieceId> {
        let target = *self.pos.board.piece(victim);
        self.possible_destinations_for_side(target.color.other(), MoveFilter::CAPTURES)
            .into_iter()
            .filter(|(_, dests)| dests.contains(&target.cell()))
            .map(|(id, _)| id)
            .collect()
    }

    /// Enemy pieces `color` can capture, each listed once, in discovery order.
    pub fn possible_victims(&mut self, color: Color, only_safe: bool) -> Vec<PieceId> {
        let filter = if only_safe {
            MoveFilter::SAFE_CAPTURES
        } else {
            MoveFilter::CAPTURES
        };
        let mut victims = Vec::new();
        for dests in self.possible_destinations_for_side(color, filter).values() {
            for cell in dests {
                if let Some(p) = self.pos.board.piece_at(*cell)
                    && !victims.contains(&p.id)
                {
                    debug_assert_ne!(p.color, color);
                    victims.push(p.id);
                }
            }
        }
        victims
    }

    /// Pieces of `color` with a legal destination on `cell`.
    pub fn friends_that_can_reach(&mut self, cell: CellNode, color: Color) -> Vec<PieceId> {
        self.possible_destinations_for_side(color, MoveFilter::ALL)
            .into_iter()
            .filter(|(_, dests)| dests.contains(&cell))
            .map(|(id, _)| id)
            .collect()
    }

    /// A cheaper friend that can step between `friend` and the straight or
    /// diagonal attacker `enemy`, with the cell to step on. Cells nearest the
    /// friend are tried first.
    pub fn blocking_friend(
        &mut self,
        friend: PieceId,
        enemy: PieceId,
    ) -> Option<(PieceId, CellNode)> {
        let f = *self.pos.board.piece(friend);
        let e = *self.pos.board.piece(enemy);
        if e.kind == PieceKind::Knight {
            return None;
        }

        let delta = e.cell() - f.cell();
        let (dr, dc) = (delta.row.abs(), delta.column.abs());
        let len = if dr == 0 || dc == 0 || dr == dc {
            dr.max(dc)
        } else {
            0
        };
        if len < 2 {
            return None;
        }
        let unit = CellNode::new(delta.row.signum(), delta.column.signum());

        for step in 1..len {
            let cell = f.cell() + unit.scaled(step);
            let best = self
                .friends_that_can_reach(cell, f.color)
                .into_iter()
                .filter(|&id| id != friend && id != enemy)
                .map(|id| (self.pos.board.piece(id).importance(), id))
                .filter(|&(importance, _)| importance < f.importance())
                .min();
            if let Some((_, id)) = best {
                return Some((id, cell));
            }
        }
        None
    }

    /// Whether `color`'s king can be captured on the opponent's next move.
    pub fn is_in_check(&mut self, color: Color) -> bool {
        let Some(king) = self.pos.board.king_of(color).map(|k| k.id) else {
            return false;
        };
        !self.possible_assassins_of(king).is_empty()
    }

    /// Pieces of `color` currently attacked, with their attackers.
    pub fn threatened_pieces(&mut self, color: Color) -> Vec<(PieceId, Vec<PieceId>)> {
        let attacks = self.possible_destinations_for_side(color.other(), MoveFilter::CAPTURES);
        let mut out: Vec<(PieceId, Vec<PieceId>)> = Vec::new();
        for (attacker, dests) in &attacks {
            for cell in dests {
                let Some(target) = self.pos.board.piece_at(*cell) else {
                    continue;
                };
                match out.iter_mut().find(|(id, _)| *id == target.id) {
                    Some((_, attackers)) => attackers.push(*attacker),
                    None => out.push((target.id, vec![*attacker])),
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "threats_tests.rs"]
mod threats_tests;
