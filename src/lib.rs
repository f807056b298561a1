//! # rust-hexnet
//!
//! Rules engine for a two-player network-building game on a hexagonal board.
//!
//! ## The game
//!
//! Blue and Red each grow a tree-shaped network from opposite corners of
//! the board. Extending a path costs energy; factories generate energy at
//! the start of each turn. Reaching the opponent's starting vertex wins.
//!
//! When the two networks come to share exactly two vertices, the opponent
//! of the mover is sabotaged: its tree is severed where the paths to those
//! vertices diverge.
//!
//! ## Architecture
//!
//! - **Arena trees**: network nodes reference each other by index, so the
//!   parent/child links never form ownership cycles.
//! - **Single owner**: `GameEngine` holds all mutable state. Renderers read
//!   `RenderSnapshot`s; input handlers send `Command`s.
//! - **Rejections are values**: an invalid move is a `MoveOutcome`, not an
//!   error. `Error` means a broken invariant.
//!
//! ## Modules
//!
//! - `core`: sides, configuration, commands, errors, RNG
//! - `board`: hex coordinates and board topology
//! - `network`: per-side network trees and the cut algorithm
//! - `rules`: the engine, energy accrual, events, snapshots
//! - `sim`: random playouts

pub mod core;
pub mod board;
pub mod network;
pub mod rules;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{Command, CommandRecord, Error, GameConfig, GameRng, Result, Side, SideMap};

pub use crate::board::{Board, Cube, Edge, EdgeId, Vertex, VertexId, HEX_OFFSETS};

pub use crate::network::{Divergence, NetworkNode, NetworkTree, NodeId};

pub use crate::rules::{
    collect_energy, EdgeView, EnergyYield, EventLog, GameEngine, GameEvent, GameObserver, MoveOutcome,
    PlayerState, Rejection, RenderSnapshot, VertexView,
};

pub use crate::sim::{PlayoutConfig, PlayoutSummary, RandomPlayout};
