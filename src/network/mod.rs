//! Per-side network trees.
//!
//! A network is the set of vertices a side has claimed, organized as a tree
//! rooted at the side's starting vertex. Paths grow it one leaf at a time;
//! sabotage cuts remove whole subtrees.

pub mod node;
pub mod tree;

pub use node::{NetworkNode, NodeId};
pub use tree::{Divergence, NetworkTree};
