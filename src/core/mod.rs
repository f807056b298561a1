//! Core engine types: sides, configuration, commands, errors, RNG.
//!
//! Everything here is independent of the board and the networks; the other
//! modules build on these types.

pub mod player;
pub mod config;
pub mod action;
pub mod error;
pub mod rng;

pub use player::{Side, SideMap};
pub use config::GameConfig;
pub use action::{Command, CommandRecord};
pub use error::{Error, Result};
pub use rng::GameRng;
