//! Turn-based game flow on top of `chess_core`.
//!
//! - [`GameConfig`] is the recognised option set, loadable from TOML
//! - [`Player`] runs one side's turn state machine
//! - [`Decider`] picks AI moves through an ordered list of decision steps
//! - [`Game`] owns everything and is driven by repeated `update(dt)` calls

mod config;
mod decision;
mod error;
mod game;
mod player;

pub use config::*;
pub use decision::*;
pub use error::*;
pub use game::*;
pub use player::*;
