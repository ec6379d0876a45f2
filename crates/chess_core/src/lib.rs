//! Board model and chess movement rules.
//!
//! - [`Board`] owns the pieces and the cell index
//! - [`RuleCatalog`] holds the movement templates per piece kind
//! - [`Arbiter`] turns templates into destinations and answers threat
//!   questions by simulating moves and rolling them back

pub mod board;
pub mod error;
pub mod layout;
pub mod movegen;
pub mod rules;
pub mod threats;
pub mod types;

pub use board::*;
pub use error::*;
pub use layout::expand_layout;
pub use movegen::*;
pub use rules::*;
pub use types::*;
