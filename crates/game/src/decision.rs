//! AI move selection.
//!
//! Each AI level is an ordered list of [`DecisionStep`]s. Steps are tried in
//! order and the first one that yields a [`Choice`] wins. A step that declines
//! leaves the position exactly as it found it.

use std::cmp::Reverse;
use std::fmt;

use chess_core::{Arbiter, CellNode, Color, Destinations, MoveFilter, PieceId, PieceKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A piece and the cell it should move to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub piece: PieceId,
    pub destination: CellNode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionStep {
    /// Capture the enemy king.
    Checkmate,
    /// Save the own king when it is attacked.
    RespondToCheck,
    /// Save the most valuable attacked piece.
    Protect,
    /// Move a piece (not a pawn or the king) somewhere safe from which it
    /// attacks the enemy king.
    DeliverCheck,
    /// Take the most valuable enemy piece with the cheapest attacker that
    /// survives the capture.
    SafeCaptureByImportance,
    /// Same ranking, whether or not the attacker survives.
    CaptureByImportance,
    /// Move the cheapest piece that has a safe destination.
    LeastValuableSafeMove,
    RandomSafeCapture,
    RandomCapture,
    /// Uniformly random piece, then uniformly random destination.
    Random,
}

impl DecisionStep {
    pub fn label(self) -> &'static str {
        match self {
            DecisionStep::Checkmate => "checkmate",
            DecisionStep::RespondToCheck => "respond to check",
            DecisionStep::Protect => "protect",
            DecisionStep::DeliverCheck => "deliver check",
            DecisionStep::SafeCaptureByImportance => "safe capture by importance",
            DecisionStep::CaptureByImportance => "capture by importance",
            DecisionStep::LeastValuableSafeMove => "least valuable safe move",
            DecisionStep::RandomSafeCapture => "random safe capture",
            DecisionStep::RandomCapture => "random capture",
            DecisionStep::Random => "random",
        }
    }
}

impl fmt::Display for DecisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strength of the computer player, `levelAI` in config files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AiLevel {
    /// 0: uniform random.
    Random,
    /// 1: random capture when there is one.
    Capture,
    /// 2: random capture, preferring safe ones.
    SafeCapture,
    /// 3: safe capture of the most valuable victim first.
    Hierarchy,
    /// 4: the full layered pipeline.
    #[default]
    Layered,
}

impl AiLevel {
    pub const ALL: [AiLevel; 5] = [
        AiLevel::Random,
        AiLevel::Capture,
        AiLevel::SafeCapture,
        AiLevel::Hierarchy,
        AiLevel::Layered,
    ];

    pub fn steps(self) -> &'static [DecisionStep] {
        use DecisionStep as S;
        match self {
            AiLevel::Random => &[S::Random],
            AiLevel::Capture => &[S::RandomCapture, S::Random],
            AiLevel::SafeCapture => &[S::RandomSafeCapture, S::RandomCapture, S::Random],
            AiLevel::Hierarchy => &[
                S::SafeCaptureByImportance,
                S::RandomSafeCapture,
                S::RandomCapture,
                S::Random,
            ],
            AiLevel::Layered => &[
                S::Checkmate,
                S::RespondToCheck,
                S::Protect,
                S::DeliverCheck,
                S::SafeCaptureByImportance,
                S::CaptureByImportance,
                S::LeastValuableSafeMove,
                S::Random,
            ],
        }
    }
}

impl TryFrom<u8> for AiLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        AiLevel::ALL
            .get(value as usize)
            .copied()
            .ok_or(ConfigError::AiLevel(value))
    }
}

impl From<AiLevel> for u8 {
    fn from(level: AiLevel) -> u8 {
        level as u8
    }
}

/// One side's view of the board while it picks a move.
pub struct Decider<'p, 'a> {
    arb: Arbiter<'p>,
    color: Color,
    possible: &'a Destinations,
    rng: &'a mut StdRng,
}

impl<'p, 'a> Decider<'p, 'a> {
    /// `possible` is the side's full destination map for this turn; every
    /// returned choice is one of its entries.
    pub fn new(
        arb: Arbiter<'p>,
        color: Color,
        possible: &'a Destinations,
        rng: &'a mut StdRng,
    ) -> Self {
        Self {
            arb,
            color,
            possible,
            rng,
        }
    }

    /// Run the level's steps in order, returning the first decision and the
    /// step that made it.
    pub fn decide(&mut self, level: AiLevel) -> Option<(DecisionStep, Choice)> {
        level
            .steps()
            .iter()
            .find_map(|&step| self.run(step).map(|choice| (step, choice)))
    }

    pub fn run(&mut self, step: DecisionStep) -> Option<Choice> {
        match step {
            DecisionStep::Checkmate => self.checkmate(),
            DecisionStep::RespondToCheck => self.respond_to_check(),
            DecisionStep::Protect => self.protect_most_valuable(),
            DecisionStep::DeliverCheck => self.deliver_check(),
            DecisionStep::SafeCaptureByImportance => {
                self.capture_by_importance(MoveFilter::SAFE_CAPTURES)
            }
            DecisionStep::CaptureByImportance => self.capture_by_importance(MoveFilter::CAPTURES),
            DecisionStep::LeastValuableSafeMove => self.least_valuable_safe_move(),
            DecisionStep::RandomSafeCapture => {
                let map = self
                    .arb
                    .possible_destinations_for_side(self.color, MoveFilter::SAFE_CAPTURES);
                pick_random(&map, self.rng)
            }
            DecisionStep::RandomCapture => {
                let map = self.arb.possible_destinations_for_side(self.color, MoveFilter::CAPTURES);
                pick_random(&map, self.rng)
            }
            DecisionStep::Random => pick_random(self.possible, self.rng),
        }
    }

    fn checkmate(&mut self) -> Option<Choice> {
        let king = self.arb.board().king_of(self.color.other())?.cell();
        self.possible
            .iter()
            .find(|(_, dests)| dests.contains(&king))
            .map(|(&piece, _)| Choice {
                piece,
                destination: king,
            })
    }

    fn respond_to_check(&mut self) -> Option<Choice> {
        let king = self.arb.board().king_of(self.color)?.id;
        let attackers = self.arb.possible_assassins_of(king);
        if attackers.is_empty() {
            return None;
        }
        self.protect(king, &attackers)
    }

    /// An attacked king outranks everything, so a failed check response fails here too.
    fn protect_most_valuable(&mut self) -> Option<Choice> {
        let threatened = self.arb.threatened_pieces(self.color);
        let board = self.arb.board();
        let (friend, attackers) = threatened
            .into_iter()
            .max_by_key(|(id, attackers)| {
                (board.piece(*id).importance(), Reverse(attackers.len()), Reverse(*id))
            })?;
        self.protect(friend, &attackers)
    }

    fn protect(&mut self, friend: PieceId, attackers: &[PieceId]) -> Option<Choice> {
        // Take an attacker where it stands.
        let safe_captures = self
            .arb
            .possible_destinations_for_side(self.color, MoveFilter::SAFE_CAPTURES);
        for &attacker in attackers {
            let cell = self.arb.board().piece(attacker).cell();
            if let Some(piece) = self.cheapest_reaching(&safe_captures, cell) {
                return Some(Choice {
                    piece,
                    destination: cell,
                });
            }
        }

        // Step out of reach.
        if let Some(&destination) = self
            .arb
            .possible_destinations(friend, MoveFilter::SAFE)
            .first()
        {
            return Some(Choice {
                piece: friend,
                destination,
            });
        }

        // Interpose something cheaper.
        if let [attacker] = attackers {
            if self.arb.board().piece(*attacker).kind != PieceKind::Knight {
                if let Some((piece, destination)) = self.arb.blocking_friend(friend, *attacker) {
                    return Some(Choice { piece, destination });
                }
            }
        }
        None
    }

    fn deliver_check(&mut self) -> Option<Choice> {
        let enemy = self.color.other();
        let safe = self.arb.possible_destinations_for_side(self.color, MoveFilter::SAFE);
        for (&piece, dests) in &safe {
            if matches!(self.arb.board().piece(piece).kind, PieceKind::Pawn | PieceKind::King) {
                continue;
            }
            for &destination in dests {
                if self
                    .arb
                    .with_hypothetical_move(piece, destination, |a| a.is_in_check(enemy))
                {
                    return Some(Choice { piece, destination });
                }
            }
        }
        None
    }

    fn capture_by_importance(&mut self, filter: MoveFilter) -> Option<Choice> {
        let map = self.arb.possible_destinations_for_side(self.color, filter);
        let board = self.arb.board();
        let victim = map
            .values()
            .flatten()
            .filter_map(|cell| board.piece_at(*cell))
            .max_by_key(|p| (p.importance(), Reverse(p.id)))?
            .cell();
        let piece = self.cheapest_reaching(&map, victim)?;
        Some(Choice {
            piece,
            destination: victim,
        })
    }

    fn least_valuable_safe_move(&mut self) -> Option<Choice> {
        let safe = self.arb.possible_destinations_for_side(self.color, MoveFilter::SAFE);
        let board = self.arb.board();
        let (&piece, dests) = safe
            .iter()
            .min_by_key(|&(&id, _)| (board.piece(id).importance(), id))?;
        let destination = *dests.first()?;
        Some(Choice { piece, destination })
    }

    /// Lowest-importance piece in `map` that lists `cell`, lowest id on ties.
    fn cheapest_reaching(&self, map: &Destinations, cell: CellNode) -> Option<PieceId> {
        let board = self.arb.board();
        map.iter()
            .filter(|(_, dests)| dests.contains(&cell))
            .map(|(&id, _)| (board.piece(id).importance(), id))
            .min()
            .map(|(_, id)| id)
    }
}

fn pick_random(map: &Destinations, rng: &mut StdRng) -> Option<Choice> {
    let ids: Vec<PieceId> = map.keys().copied().collect();
    let piece = *ids.choose(rng)?;
    let destination = *map[&piece].choose(rng)?;
    Some(Choice { piece, destination })
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod decision_tests;
