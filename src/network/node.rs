//! Network tree nodes.
//!
//! Nodes live in an arena owned by their [`NetworkTree`](super::NetworkTree)
//! and refer to each other by `NodeId` index, so parent and child links never
//! form ownership cycles.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::VertexId;

/// Index into a `NetworkTree` node arena.
///
/// Ids are only meaningful for the tree that issued them and are reassigned
/// whenever the tree is cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One vertex claimed by a side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// The claimed board vertex.
    pub vertex: VertexId,

    /// Does this vertex carry a factory?
    pub is_factory: bool,

    /// Parent node (`None` for the root).
    pub parent: Option<NodeId>,

    /// Child nodes. A hex vertex has at most six neighbors.
    pub children: SmallVec<[NodeId; 6]>,
}

impl NetworkNode {
    /// Create a root node.
    #[must_use]
    pub fn root(vertex: VertexId, is_factory: bool) -> Self {
        Self {
            vertex,
            is_factory,
            parent: None,
            children: SmallVec::new(),
        }
    }

    /// Create a leaf node under `parent`.
    #[must_use]
    pub fn leaf(vertex: VertexId, parent: NodeId) -> Self {
        Self {
            vertex,
            is_factory: false,
            parent: Some(parent),
            children: SmallVec::new(),
        }
    }

    /// Check if this is the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
