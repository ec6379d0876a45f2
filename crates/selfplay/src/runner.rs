//! Plays games back to back by ticking the controller.

use chess_core::Color;
use chess_game::{ConfigError, Game, GameConfig, Outcome};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of games to play.
    pub games: u32,
    /// Moves after which an undecided game is abandoned.
    pub max_turns: u32,
    /// Milliseconds passed to every `update` call.
    pub frame_ms: u64,
    pub game: GameConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_turns: 300,
            frame_ms: 16,
            game: GameConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game: u32,
    pub seed: Option<u64>,
    pub outcome: Outcome,
    pub turns: u32,
    /// True when the move cap stopped the game.
    pub capped: bool,
    pub final_layout: String,
}

/// Wins per side and undecided games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub white: u32,
    pub black: u32,
    pub draws: u32,
}

impl Tally {
    pub fn from_summaries(summaries: &[GameSummary]) -> Self {
        let mut tally = Tally::default();
        for s in summaries {
            match s.outcome.winner() {
                Some(Color::White) => tally.white += 1,
                Some(Color::Black) => tally.black += 1,
                None => tally.draws += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> u32 {
        self.white + self.black + self.draws
    }
}

pub struct Runner {
    config: RunConfig,
}

impl Runner {
    /// Games always run unattended: no humans, no auto-restart.
    pub fn new(mut config: RunConfig) -> Self {
        config.game.human_players = 0;
        config.game.infinite_loop = false;
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn run(&self) -> Result<Vec<GameSummary>, ConfigError> {
        (0..self.config.games).map(|i| self.play_game(i)).collect()
    }

    /// Play game `index`. A fixed base seed is offset by the index so every
    /// game differs but the run stays reproducible.
    pub fn play_game(&self, index: u32) -> Result<GameSummary, ConfigError> {
        let mut config = self.config.game.clone();
        config.seed = config.seed.map(|s| s.wrapping_add(index as u64));
        let seed = config.seed;
        let mut game = Game::new(config)?;

        while !game.outcome().is_over() && game.turn() < self.config.max_turns {
            game.update(self.config.frame_ms);
        }

        let summary = GameSummary {
            game: index + 1,
            seed,
            outcome: game.outcome(),
            turns: game.turn(),
            capped: !game.outcome().is_over(),
            final_layout: game.board().to_layout(),
        };
        info!(
            "Game {}/{}: {:?} after {} moves{}",
            summary.game,
            self.config.games,
            summary.outcome,
            summary.turns,
            if summary.capped { " (capped)" } else { "" }
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
