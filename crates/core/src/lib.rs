//! Monte Carlo estimate of how often a four-card-window patience game clears
//! the whole deck. Keep this crate free of argument parsing and terminal concerns.

pub mod cards;
pub mod config;
pub mod deck;
pub mod error;
pub mod game;
pub mod render;
pub mod report;
pub mod rng;
pub mod runner;

pub use cards::*;
pub use config::*;
pub use deck::*;
pub use error::*;
pub use game::*;
pub use render::*;
pub use report::*;
pub use rng::*;
pub use runner::*;
