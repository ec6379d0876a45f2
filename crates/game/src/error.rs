use std::path::PathBuf;

use chess_core::{CellNode, Color, LayoutError, PieceId};

/// Why a configuration could not be loaded.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("AI level {0} out of range, expected 0..=4")]
    AiLevel(u8),

    #[error("{0} human players requested, at most 2 are supported")]
    HumanPlayers(u8),

    #[error("starting layout rejected: {0}")]
    Layout(#[from] LayoutError),
}

/// Why a human move submission was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,

    #[error("{0} is played by the AI")]
    NotHuman(Color),

    #[error("{0} is not waiting for a decision")]
    NoDecisionPending(Color),

    #[error("piece {0} is not on the board")]
    UnknownPiece(PieceId),

    #[error("piece {piece} does not belong to {color}")]
    NotYourPiece { piece: PieceId, color: Color },

    #[error("piece {piece} cannot move to {destination}")]
    IllegalDestination { piece: PieceId, destination: CellNode },
}
