//! Per-side turn state machine.

use chess_core::{
    Arbiter, CellNode, Color, Destinations, MoveFilter, PieceId, PieceKind, Position, RuleCatalog,
};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::decision::{AiLevel, Choice, Decider, DecisionStep};
use crate::error::MoveError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    WaitForPieceDecision,
    WaitForMovementDecision,
    /// Pacing delay before the chosen move is committed.
    WaitForPieceToMove,
    EvaluatePosition,
    EndTurn,
    /// The enemy king was captured.
    Win,
    /// The turn started without a single legal destination.
    NoLegalMoves,
}

impl PlayerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PlayerState::Win | PlayerState::NoLegalMoves)
    }
}

/// One committed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub turn: u32,
    pub color: Color,
    pub piece: PieceId,
    pub kind: PieceKind,
    pub from: CellNode,
    pub to: CellNode,
    pub captured: Option<PieceKind>,
    /// Which AI step chose the move; `None` for human moves.
    pub step: Option<DecisionStep>,
}

/// Everything a player borrows from the game for one tick.
pub(crate) struct TurnContext<'a> {
    pub position: &'a mut Position,
    pub rules: &'a RuleCatalog,
    pub rng: &'a mut StdRng,
    pub level: AiLevel,
    pub movement_time: u64,
    pub turn: u32,
}

#[derive(Debug, Clone)]
pub struct Player {
    color: Color,
    human: bool,
    state: PlayerState,
    /// Full destination map for the current turn.
    possible: Destinations,
    piece: Option<PieceId>,
    destination: Option<usize>,
    step: Option<DecisionStep>,
    timer: u64,
    captured: Vec<PieceKind>,
}

impl Player {
    pub fn new(color: Color, human: bool) -> Self {
        Self {
            color,
            human,
            state: PlayerState::EndTurn,
            possible: Destinations::new(),
            piece: None,
            destination: None,
            step: None,
            timer: 0,
            captured: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_human(&self) -> bool {
        self.human
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Enemy piece kinds taken this game, in capture order.
    pub fn captured(&self) -> &[PieceKind] {
        &self.captured
    }

    /// Legal destinations for this turn, as computed when it started.
    pub fn possible(&self) -> &Destinations {
        &self.possible
    }

    /// The decided move, once both halves are set.
    pub fn pending(&self) -> Option<Choice> {
        let piece = self.piece?;
        let index = self.destination?;
        Some(Choice {
            piece,
            destination: self.possible[&piece][index],
        })
    }

    pub(crate) fn start_turn(&mut self, position: &mut Position, rules: &RuleCatalog) {
        self.timer = 0;
        self.piece = None;
        self.destination = None;
        self.step = None;
        self.possible = Arbiter::new(position, rules)
            .possible_destinations_for_side(self.color, MoveFilter::ALL);
        self.goto(PlayerState::WaitForPieceDecision);
    }

    /// Record a human decision. Takes effect on the next tick.
    pub(crate) fn submit(
        &mut self,
        position: &Position,
        piece: PieceId,
        destination: CellNode,
    ) -> Result<(), MoveError> {
        if !self.human {
            return Err(MoveError::NotHuman(self.color));
        }
        if self.state != PlayerState::WaitForPieceDecision {
            return Err(MoveError::NoDecisionPending(self.color));
        }
        let owner = position
            .board
            .get(piece)
            .ok_or(MoveError::UnknownPiece(piece))?
            .color;
        if owner != self.color {
            return Err(MoveError::NotYourPiece {
                piece,
                color: self.color,
            });
        }
        let index = self
            .possible
            .get(&piece)
            .and_then(|dests| dests.iter().position(|d| *d == destination))
            .ok_or(MoveError::IllegalDestination { piece, destination })?;
        self.piece = Some(piece);
        self.destination = Some(index);
        Ok(())
    }

    /// Advance by one tick. Returns the move when one is committed.
    pub(crate) fn update(&mut self, dt: u64, ctx: TurnContext<'_>) -> Option<MoveRecord> {
        match self.state {
            PlayerState::WaitForPieceDecision => {
                self.wait_for_piece_decision(ctx);
                None
            }
            PlayerState::WaitForMovementDecision => {
                if self.destination.is_some() {
                    self.goto(PlayerState::WaitForPieceToMove);
                }
                None
            }
            PlayerState::WaitForPieceToMove => {
                self.timer = self.timer.saturating_add(dt);
                if self.timer >= ctx.movement_time {
                    self.goto(PlayerState::EvaluatePosition);
                }
                None
            }
            PlayerState::EvaluatePosition => Some(self.evaluate_position(ctx)),
            PlayerState::EndTurn | PlayerState::Win | PlayerState::NoLegalMoves => None,
        }
    }

    fn wait_for_piece_decision(&mut self, ctx: TurnContext<'_>) {
        if self.possible.is_empty() {
            info!("{} has no legal move", self.color);
            self.goto(PlayerState::NoLegalMoves);
            return;
        }
        if !self.human {
            self.generate_decision(ctx);
        }
        if self.piece.is_some() {
            self.goto(PlayerState::WaitForMovementDecision);
        }
    }

    fn generate_decision(&mut self, ctx: TurnContext<'_>) {
        let arb = Arbiter::new(ctx.position, ctx.rules);
        let decision = Decider::new(arb, self.color, &self.possible, ctx.rng).decide(ctx.level);
        let Some((step, choice)) = decision else {
            return;
        };
        let index = self.possible[&choice.piece]
            .iter()
            .position(|d| *d == choice.destination)
            .unwrap_or_else(|| {
                panic!(
                    "{step} chose {} for piece {}, not a legal destination",
                    choice.destination, choice.piece
                )
            });
        debug!(
            "{} [{step}] piece {} -> {}",
            self.color, choice.piece, choice.destination
        );
        self.piece = Some(choice.piece);
        self.destination = Some(index);
        self.step = Some(step);
    }

    fn evaluate_position(&mut self, ctx: TurnContext<'_>) -> MoveRecord {
        let choice = self
            .pending()
            .unwrap_or_else(|| panic!("{} evaluating without a decision", self.color));
        let board = &mut ctx.position.board;
        let mover = *board.piece(choice.piece);
        let to = choice.destination;

        let mut captured = None;
        if let Some(victim) = board.piece_at(to).copied() {
            assert_ne!(
                victim.color, self.color,
                "piece {} would land on friendly piece {}",
                mover.id, victim.id
            );
            board.remove_piece(victim.id);
            self.captured.push(victim.kind);
            captured = Some(victim.kind);
            info!("{} {} takes {} at {to}", self.color, mover.kind, victim.kind);
            if victim.kind == PieceKind::King {
                info!("{} wins", self.color);
                self.goto(PlayerState::Win);
            }
        }

        if mover.kind == PieceKind::Pawn && (to.row - mover.row).abs() == 2 {
            ctx.position.record_double_step(mover.id);
        }
        ctx.position.board.move_piece_to(mover.id, to);

        if self.state != PlayerState::Win {
            self.goto(PlayerState::EndTurn);
        }
        MoveRecord {
            turn: ctx.turn,
            color: self.color,
            piece: mover.id,
            kind: mover.kind,
            from: mover.cell(),
            to,
            captured,
            step: self.step,
        }
    }

    fn goto(&mut self, state: PlayerState) {
        trace!("{}: {:?} -> {:?}", self.color, self.state, state);
        self.state = state;
    }
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod player_tests;
