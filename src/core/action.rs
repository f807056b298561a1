//! UI commands and command history.
//!
//! The input layer never mutates game state directly. It translates clicks
//! into a `Command` and hands it to
//! [`GameEngine::apply`](crate::rules::GameEngine::apply):
//! - vertex clicked -> build a factory there
//! - edge clicked -> extend a path along it
//! - end turn / reset buttons

use serde::{Deserialize, Serialize};

use super::player::Side;
use crate::board::{EdgeId, VertexId};

/// A command issued by the acting side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Build a factory on a vertex of the acting side's network.
    BuildFactory(VertexId),
    /// Extend the acting side's network along an edge.
    BuildPath(EdgeId),
    /// Pass the turn to the opponent.
    EndTurn,
    /// Discard the game and start over.
    Reset,
}

impl Command {
    /// Command for a click on a vertex.
    #[must_use]
    pub const fn vertex_clicked(vertex: VertexId) -> Self {
        Command::BuildFactory(vertex)
    }

    /// Command for a click on an edge.
    #[must_use]
    pub const fn edge_clicked(edge: EdgeId) -> Self {
        Command::BuildPath(edge)
    }

    /// Check if this command is a build (path or factory).
    #[must_use]
    pub const fn is_build(&self) -> bool {
        matches!(self, Command::BuildFactory(_) | Command::BuildPath(_))
    }
}

/// A processed command with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The side that was to move.
    pub side: Side,

    /// The command processed.
    pub command: Command,

    /// Turn number when the command arrived.
    pub turn: u32,

    /// Whether the command changed the game state.
    pub applied: bool,
}

impl CommandRecord {
    /// Create a new command record.
    #[must_use]
    pub fn new(side: Side, command: Command, turn: u32, applied: bool) -> Self {
        Self {
            side,
            command,
            turn,
            applied,
        }
    }
}
