//! Hex board topology.
//!
//! The board is generated once per game from a radius and is otherwise
//! static; the engine only changes edge owners.

pub mod coord;
pub mod topology;

pub use coord::{Cube, HEX_OFFSETS};
pub use topology::{Board, Edge, EdgeId, Vertex, VertexId};
