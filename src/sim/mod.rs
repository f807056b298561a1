//! Automated play.
//!
//! There is no AI opponent in the game itself; this module only exists to
//! drive engines through long random games.

pub mod playout;

pub use playout::{PlayoutConfig, PlayoutSummary, RandomPlayout};
