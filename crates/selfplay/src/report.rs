//! Run results, as text and as JSON.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::runner::{GameSummary, RunConfig, Tally};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfplayReport {
    pub config: RunConfig,
    pub tally: Tally,
    pub games: Vec<GameSummary>,
}

impl SelfplayReport {
    pub fn new(config: RunConfig, games: Vec<GameSummary>) -> Self {
        Self {
            tally: Tally::from_summaries(&games),
            config,
            games,
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Self-play: {} games, level {} ===\n\n",
            self.games.len(),
            u8::from(self.config.game.level_ai)
        ));
        report.push_str(&format!(
            "{:<6} {:<24} {:>6}\n",
            "Game", "Outcome", "Moves"
        ));
        report.push_str(&"-".repeat(38));
        report.push('\n');

        for g in &self.games {
            let outcome = format!("{:?}", g.outcome);
            report.push_str(&format!("{:<6} {:<24} {:>6}\n", g.game, outcome, g.turns));
        }

        report.push('\n');
        report.push_str(&format!(
            "White {} / Black {} / Undecided {}\n",
            self.tally.white, self.tally.black, self.tally.draws
        ));
        report
    }

    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
