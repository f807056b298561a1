//! Error types for the engine.
//!
//! Rejected moves are not errors; they come back as
//! [`MoveOutcome::Rejected`](crate::rules::MoveOutcome::Rejected).
//! An `Error` means a structural invariant broke or an API precondition was
//! violated, and the failing operation must not be retried.

use thiserror::Error;

use super::Side;
use crate::board::{EdgeId, VertexId};

/// Main error type for the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("lineage of {vertex} exceeds the depth limit of {limit}")]
    ExcessiveDepth { vertex: VertexId, limit: usize },

    #[error("{a} and {b} share no common ancestor")]
    NoCommonAncestor { a: VertexId, b: VertexId },

    #[error("{vertex} is not in the network")]
    VertexAbsent { vertex: VertexId },

    #[error("{vertex} is already in the network")]
    VertexPresent { vertex: VertexId },

    #[error("{0} does not exist on the board")]
    UnknownVertex(VertexId),

    #[error("{0} does not exist on the board")]
    UnknownEdge(EdgeId),

    #[error("owner of {edge} disagrees with the networks")]
    OwnershipMismatch { edge: EdgeId },

    #[error("{side} lookup differs from the nodes reachable from its root")]
    LookupMismatch { side: Side },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
