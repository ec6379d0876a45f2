//! Game controller: owns the board, the rules, both players and the RNG.

use chess_core::{Arbiter, Board, CellNode, Color, Piece, PieceId, PieceKind, Position, RuleCatalog};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::{ConfigError, MoveError};
use crate::player::{MoveRecord, Player, PlayerState, TurnContext};

/// How the current game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    /// This side captured the enemy king.
    Won(Color),
    /// This side had no legal move while its king was attacked.
    Checkmated(Color),
    /// This side had no legal move and its king was safe.
    Stalemate(Color),
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }

    /// The side that came out on top, if any.
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Won(color) => Some(color),
            Outcome::Checkmated(color) => Some(color.other()),
            Outcome::InProgress | Outcome::Stalemate(_) => None,
        }
    }
}

pub struct Game {
    config: GameConfig,
    rules: RuleCatalog,
    /// Layout every (re)started game begins from.
    initial: Board,
    position: Position,
    players: [Player; 2],
    active: Color,
    rng: StdRng,
    outcome: Outcome,
    history: Vec<MoveRecord>,
    completed: Vec<Outcome>,
    games_played: u32,
}

impl Game {
    /// Build a game and start White's first turn.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial = match &config.layout {
            Some(text) => Board::from_layout(text)?,
            None => Board::new(),
        };
        let mut game = Self {
            rules: RuleCatalog::new(),
            position: Position::from_board(initial.clone()),
            players: [
                Player::new(Color::White, config.is_human(Color::White)),
                Player::new(Color::Black, config.is_human(Color::Black)),
            ],
            active: Color::White,
            rng: seeded_rng(config.seed),
            outcome: Outcome::InProgress,
            history: Vec::new(),
            completed: Vec::new(),
            games_played: 0,
            initial,
            config,
        };
        game.reset_game();
        Ok(game)
    }

    /// Throw the current game away and start over from the initial layout.
    pub fn reset_game(&mut self) {
        self.position = Position::from_board(self.initial.clone());
        self.players = [
            Player::new(Color::White, self.config.is_human(Color::White)),
            Player::new(Color::Black, self.config.is_human(Color::Black)),
        ];
        self.games_played += 1;
        self.rng = seeded_rng(self.game_seed());
        self.outcome = Outcome::InProgress;
        self.history.clear();
        info!("game {} started", self.games_played);

        // White opens.
        self.active = Color::Black;
        self.toggle_player_in_turn();
    }

    /// Hand the turn to the other side and start it.
    pub fn toggle_player_in_turn(&mut self) {
        self.active = self.active.other();
        let player = &mut self.players[self.active.idx()];
        player.start_turn(&mut self.position, &self.rules);
    }

    /// Advance the active player by one tick of `dt` milliseconds.
    pub fn update(&mut self, dt: u64) {
        if self.outcome.is_over() {
            return;
        }
        let ctx = TurnContext {
            position: &mut self.position,
            rules: &self.rules,
            rng: &mut self.rng,
            level: self.config.level_ai,
            movement_time: self.config.movement_time,
            turn: self.history.len() as u32 + 1,
        };
        let player = &mut self.players[self.active.idx()];
        if let Some(record) = player.update(dt, ctx) {
            self.history.push(record);
        }

        match player.state() {
            PlayerState::EndTurn => self.toggle_player_in_turn(),
            PlayerState::Win => self.finish(Outcome::Won(self.active)),
            PlayerState::NoLegalMoves => {
                let in_check =
                    Arbiter::new(&mut self.position, &self.rules).is_in_check(self.active);
                let outcome = if in_check {
                    Outcome::Checkmated(self.active)
                } else {
                    Outcome::Stalemate(self.active)
                };
                self.finish(outcome);
            }
            _ => {}
        }
    }

    /// Queue a move for the human-controlled side to move.
    pub fn submit_move(&mut self, piece: PieceId, destination: CellNode) -> Result<(), MoveError> {
        if self.outcome.is_over() {
            return Err(MoveError::GameOver);
        }
        self.players[self.active.idx()].submit(&self.position, piece, destination)
    }

    fn finish(&mut self, outcome: Outcome) {
        info!("game {} over after {} moves: {outcome:?}", self.games_played, self.history.len());
        self.outcome = outcome;
        self.completed.push(outcome);
        if self.config.infinite_loop {
            self.reset_game();
        }
    }

    /// Diagnostic name of a piece kind.
    pub fn name_piece(kind: PieceKind) -> &'static str {
        kind.name()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.position.board.pieces()
    }

    pub fn is_dark_cell(row: i8, column: i8) -> bool {
        Board::is_dark_cell(row, column)
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn active_color(&self) -> Color {
        self.active
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.idx()]
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Moves committed in the current game.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn turn(&self) -> u32 {
        self.history.len() as u32
    }

    /// Outcomes of every finished game, oldest first.
    pub fn completed(&self) -> &[Outcome] {
        &self.completed
    }

    /// Games started so far, the current one included.
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Seed of the current game: the configured seed offset by the game number.
    pub fn game_seed(&self) -> Option<u64> {
        self.config
            .seed
            .map(|seed| seed.wrapping_add(u64::from(self.games_played)))
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
