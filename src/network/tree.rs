//! Arena-based network tree.
//!
//! Each side's network is a rooted tree of claimed vertices stored in a flat
//! `Vec<NetworkNode>`, plus a vertex lookup that always holds exactly the
//! nodes reachable from the root.
//!
//! ## Arena order
//!
//! A parent's `NodeId` is always smaller than its children's: `attach`
//! appends, and `rebuild` lays the tree out in preorder. Bottom-up passes can
//! therefore walk the arena in reverse.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::node::{NetworkNode, NodeId};
use crate::board::VertexId;
use crate::core::{Error, Result};

/// Where two root-first lineages part ways.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Divergence {
    /// Both lineages continue past `index` with different nodes.
    Branch(usize),
    /// The shorter lineage ends at `index`; it is an ancestor of the other.
    Prefix(usize),
}

impl Divergence {
    /// Compare two root-first lineages.
    ///
    /// Returns `None` when they do not even share a root.
    #[must_use]
    pub fn between(a: &[NodeId], b: &[NodeId]) -> Option<Self> {
        let shared = a.iter().zip(b).take_while(|(x, y)| x == y).count();
        if shared == 0 {
            None
        } else if shared < a.len() && shared < b.len() {
            Some(Divergence::Branch(shared))
        } else {
            Some(Divergence::Prefix(shared))
        }
    }

    /// Number of leading nodes the lineages have in common.
    #[must_use]
    pub fn shared_len(self) -> usize {
        match self {
            Divergence::Branch(i) | Divergence::Prefix(i) => i,
        }
    }
}

/// A side's network.
#[derive(Clone, Debug)]
pub struct NetworkTree {
    /// All live nodes; index 0 is the root.
    nodes: Vec<NetworkNode>,

    /// Vertex -> node for every node reachable from the root.
    lookup: FxHashMap<VertexId, NodeId>,

    /// Lineage walks longer than this are treated as corruption.
    max_depth: usize,
}

impl NetworkTree {
    /// The root always sits at the start of the arena.
    pub const ROOT: NodeId = NodeId(0);

    /// Create a tree holding only its root.
    #[must_use]
    pub fn new(root: VertexId, is_factory: bool, max_depth: usize) -> Self {
        let mut lookup = FxHashMap::default();
        lookup.insert(root, Self::ROOT);
        Self {
            nodes: vec![NetworkNode::root(root, is_factory)],
            lookup,
            max_depth,
        }
    }

    /// The root's vertex.
    #[must_use]
    pub fn root_vertex(&self) -> VertexId {
        self.nodes[Self::ROOT.index()].vertex
    }

    /// Number of claimed vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lineage safety bound.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Check if a vertex belongs to this network.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.lookup.contains_key(&vertex)
    }

    /// Node holding a vertex.
    #[must_use]
    pub fn node_of(&self, vertex: VertexId) -> Option<NodeId> {
        self.lookup.get(&vertex).copied()
    }

    /// Get a node by id.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &NetworkNode {
        &self.nodes[id.index()]
    }

    /// Node data for a vertex.
    #[must_use]
    pub fn node(&self, vertex: VertexId) -> Option<&NetworkNode> {
        self.node_of(vertex).map(|id| self.get(id))
    }

    /// Iterate over all nodes in arena order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeId, &NetworkNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// All claimed vertices, unordered.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.lookup.keys().copied()
    }

    /// Check if a vertex carries this side's factory.
    #[must_use]
    pub fn is_factory(&self, vertex: VertexId) -> bool {
        self.node(vertex).is_some_and(|n| n.is_factory)
    }

    /// Check if `a` and `b` are directly linked (either is the other's parent).
    #[must_use]
    pub fn is_parent_child(&self, a: VertexId, b: VertexId) -> bool {
        let (Some(na), Some(nb)) = (self.node_of(a), self.node_of(b)) else {
            return false;
        };
        self.get(na).parent == Some(nb) || self.get(nb).parent == Some(na)
    }

    /// Add `child` as a new leaf under `parent`.
    ///
    /// `parent` must be present and `child` absent.
    pub fn attach(&mut self, parent: VertexId, child: VertexId) -> Result<NodeId> {
        let parent_id = self
            .node_of(parent)
            .ok_or(Error::VertexAbsent { vertex: parent })?;
        if self.contains(child) {
            return Err(Error::VertexPresent { vertex: child });
        }

        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(NetworkNode::leaf(child, parent_id));
        self.nodes[parent_id.index()].children.push(id);
        self.lookup.insert(child, id);
        Ok(id)
    }

    /// Mark a vertex as a factory. Idempotent.
    pub fn mark_factory(&mut self, vertex: VertexId) -> Result<()> {
        let id = self.node_of(vertex).ok_or(Error::VertexAbsent { vertex })?;
        self.nodes[id.index()].is_factory = true;
        Ok(())
    }

    /// Nodes from the root down to `vertex`, inclusive.
    pub fn lineage(&self, vertex: VertexId) -> Result<Vec<NodeId>> {
        let mut current = self.node_of(vertex).ok_or(Error::VertexAbsent { vertex })?;
        let mut lineage = Vec::new();
        loop {
            lineage.push(current);
            let Some(parent) = self.get(current).parent else {
                break;
            };
            if lineage.len() > self.max_depth {
                return Err(Error::ExcessiveDepth {
                    vertex,
                    limit: self.max_depth,
                });
            }
            current = parent;
        }
        lineage.reverse();
        Ok(lineage)
    }

    /// True if the node or anything below it is a factory.
    #[must_use]
    pub fn has_descendant_factory(&self, id: NodeId) -> bool {
        let node = self.get(id);
        node.is_factory || node.children.iter().any(|&c| self.has_descendant_factory(c))
    }

    /// Distance gate for extending the network from `_from`.
    ///
    /// No build distance limit is enforced; every node qualifies.
    #[must_use]
    pub fn within_build_range(&self, _from: NodeId) -> bool {
        true
    }

    /// Sever the network where the lineages of `a` and `b` part ways.
    ///
    /// Returns the vertices that left the network, in id order.
    pub fn cut_between(&mut self, a: VertexId, b: VertexId) -> Result<Vec<VertexId>> {
        let lineage_a = self.lineage(a)?;
        let lineage_b = self.lineage(b)?;
        self.cut_at(&lineage_a, &lineage_b)
    }

    /// Sever the network at the nearest common ancestor of two lineages.
    ///
    /// - Lineages that branch: both diverging children are detached from
    ///   their shared parent.
    /// - One lineage is a prefix of the other: the child of the shorter
    ///   lineage's last node along the longer lineage is detached.
    ///
    /// The lookup is rebuilt from the root afterwards. Returns the vertices
    /// that left the network, in id order.
    pub fn cut_at(&mut self, lineage_a: &[NodeId], lineage_b: &[NodeId]) -> Result<Vec<VertexId>> {
        let divergence = Divergence::between(lineage_a, lineage_b)
            .filter(|_| lineage_a[0] == Self::ROOT)
            .ok_or_else(|| self.no_common_ancestor(lineage_a, lineage_b))?;
        for &id in lineage_a.iter().chain(lineage_b) {
            if id.index() >= self.nodes.len() {
                return Err(self.no_common_ancestor(lineage_a, lineage_b));
            }
        }

        let mut severed: SmallVec<[NodeId; 2]> = SmallVec::new();
        match divergence {
            Divergence::Branch(i) => {
                severed.push(lineage_a[i]);
                severed.push(lineage_b[i]);
            }
            Divergence::Prefix(i) => {
                let longer = if lineage_a.len() > lineage_b.len() { lineage_a } else { lineage_b };
                // Identical lineages name the same vertex; nothing to sever.
                if let Some(&child) = longer.get(i) {
                    severed.push(child);
                }
            }
        }
        if severed.is_empty() {
            return Ok(Vec::new());
        }

        for &id in &severed {
            self.detach(id);
        }

        let before: Vec<VertexId> = self.lookup.keys().copied().collect();
        self.rebuild();
        let mut removed: Vec<VertexId> = before.into_iter().filter(|v| !self.contains(*v)).collect();
        removed.sort_unstable();
        Ok(removed)
    }

    /// Verify the lookup against a fresh traversal from the root.
    #[must_use]
    pub fn lookup_is_consistent(&self) -> bool {
        let mut reachable = 0;
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.get(id);
            if self.lookup.get(&node.vertex) != Some(&id) {
                return false;
            }
            reachable += 1;
            if reachable > self.nodes.len() {
                return false;
            }
            stack.extend(node.children.iter().copied());
        }
        reachable == self.lookup.len() && reachable == self.nodes.len()
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|c| *c != id);
        }
    }

    /// Re-lay the arena in preorder from the root, dropping detached nodes.
    fn rebuild(&mut self) {
        let mut nodes: Vec<NetworkNode> = Vec::with_capacity(self.nodes.len());
        let mut lookup = FxHashMap::default();
        let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(Self::ROOT, None)];

        while let Some((old, parent)) = stack.pop() {
            let source = &self.nodes[old.index()];
            let id = NodeId::new(nodes.len() as u32);
            nodes.push(NetworkNode {
                vertex: source.vertex,
                is_factory: source.is_factory,
                parent,
                children: SmallVec::new(),
            });
            lookup.insert(source.vertex, id);
            if let Some(p) = parent {
                nodes[p.index()].children.push(id);
            }
            stack.extend(source.children.iter().rev().map(|&c| (c, Some(id))));
        }

        self.nodes = nodes;
        self.lookup = lookup;
    }

    fn no_common_ancestor(&self, lineage_a: &[NodeId], lineage_b: &[NodeId]) -> Error {
        let tip = |lineage: &[NodeId]| {
            lineage
                .last()
                .and_then(|id| self.nodes.get(id.index()))
                .map_or(self.root_vertex(), |n| n.vertex)
        };
        Error::NoCommonAncestor {
            a: tip(lineage_a),
            b: tip(lineage_b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: u32) -> VertexId {
        VertexId::new(id)
    }

    /// ```text
    ///        0
    ///        |
    ///        1
    ///      / | \
    ///     2  3  6
    ///     |  |
    ///     4  5
    /// ```
    fn branching_tree() -> NetworkTree {
        let mut tree = NetworkTree::new(v(0), false, 100);
        tree.attach(v(0), v(1)).unwrap();
        tree.attach(v(1), v(2)).unwrap();
        tree.attach(v(1), v(3)).unwrap();
        tree.attach(v(2), v(4)).unwrap();
        tree.attach(v(3), v(5)).unwrap();
        tree.attach(v(1), v(6)).unwrap();
        tree
    }

    #[test]
    fn test_new_tree() {
        let tree = NetworkTree::new(v(7), false, 100);

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root_vertex(), v(7));
        assert!(tree.contains(v(7)));
        assert!(!tree.is_factory(v(7)));
        assert!(tree.lookup_is_consistent());
    }

    #[test]
    fn test_attach() {
        let mut tree = NetworkTree::new(v(0), false, 100);
        let id = tree.attach(v(0), v(1)).unwrap();

        assert_eq!(id, NodeId::new(1));
        assert!(tree.contains(v(1)));
        assert_eq!(tree.get(id).parent, Some(NetworkTree::ROOT));
        assert_eq!(tree.get(NetworkTree::ROOT).children.as_slice(), &[id]);
        assert!(tree.is_parent_child(v(0), v(1)));
        assert!(tree.is_parent_child(v(1), v(0)));
    }

    #[test]
    fn test_attach_preconditions() {
        let mut tree = NetworkTree::new(v(0), false, 100);
        tree.attach(v(0), v(1)).unwrap();

        assert_eq!(tree.attach(v(9), v(2)), Err(Error::VertexAbsent { vertex: v(9) }));
        assert_eq!(tree.attach(v(0), v(1)), Err(Error::VertexPresent { vertex: v(1) }));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_mark_factory_idempotent() {
        let mut tree = NetworkTree::new(v(0), false, 100);
        tree.mark_factory(v(0)).unwrap();
        tree.mark_factory(v(0)).unwrap();

        assert!(tree.is_factory(v(0)));
        assert_eq!(tree.mark_factory(v(3)), Err(Error::VertexAbsent { vertex: v(3) }));
    }

    #[test]
    fn test_lineage_root_first() {
        let tree = branching_tree();
        let lineage = tree.lineage(v(5)).unwrap();
        let vertices: Vec<_> = lineage.iter().map(|&id| tree.get(id).vertex).collect();

        assert_eq!(vertices, vec![v(0), v(1), v(3), v(5)]);
        assert_eq!(tree.lineage(v(0)).unwrap(), vec![NetworkTree::ROOT]);
    }

    #[test]
    fn test_lineage_depth_limit() {
        let mut tree = NetworkTree::new(v(0), false, 3);
        for i in 0..4 {
            tree.attach(v(i), v(i + 1)).unwrap();
        }

        assert!(tree.lineage(v(3)).is_ok());
        assert_eq!(
            tree.lineage(v(4)),
            Err(Error::ExcessiveDepth { vertex: v(4), limit: 3 })
        );
    }

    #[test]
    fn test_divergence() {
        let n = |ids: &[u32]| ids.iter().map(|&i| NodeId::new(i)).collect::<Vec<_>>();

        assert_eq!(Divergence::between(&n(&[0, 1, 2]), &n(&[0, 1, 3])), Some(Divergence::Branch(2)));
        assert_eq!(Divergence::between(&n(&[0, 1]), &n(&[0, 1, 3])), Some(Divergence::Prefix(2)));
        assert_eq!(Divergence::between(&n(&[0, 1, 3]), &n(&[0])), Some(Divergence::Prefix(1)));
        assert_eq!(Divergence::between(&n(&[1]), &n(&[2])), None);
        assert_eq!(Divergence::Branch(2).shared_len(), 2);
    }

    #[test]
    fn test_cut_branching() {
        let mut tree = branching_tree();
        let removed = tree.cut_between(v(4), v(5)).unwrap();

        assert_eq!(removed, vec![v(2), v(3), v(4), v(5)]);
        assert_eq!(tree.len(), 3);
        assert!(tree.contains(v(0)));
        assert!(tree.contains(v(1)));
        assert!(tree.contains(v(6)));
        assert!(tree.is_parent_child(v(1), v(6)));
        assert!(tree.lookup_is_consistent());
    }

    #[test]
    fn test_cut_ancestor() {
        let mut tree = branching_tree();
        let removed = tree.cut_between(v(5), v(1)).unwrap();

        assert_eq!(removed, vec![v(3), v(5)]);
        assert!(tree.contains(v(2)));
        assert!(tree.contains(v(4)));
        assert!(tree.contains(v(6)));
        assert!(tree.lookup_is_consistent());
    }

    #[test]
    fn test_cut_with_root() {
        let mut tree = branching_tree();
        let removed = tree.cut_between(v(0), v(6)).unwrap();

        assert_eq!(removed, vec![v(1), v(2), v(3), v(4), v(5), v(6)]);
        assert_eq!(tree.len(), 1);
        assert!(tree.lookup_is_consistent());
    }

    #[test]
    fn test_cut_preserves_factories() {
        let mut tree = branching_tree();
        tree.mark_factory(v(1)).unwrap();
        tree.mark_factory(v(4)).unwrap();

        tree.cut_between(v(5), v(3)).unwrap();

        assert!(tree.is_factory(v(1)));
        assert!(tree.is_factory(v(4)));
    }

    #[test]
    fn test_cut_foreign_lineage() {
        let mut tree = branching_tree();
        let foreign = vec![NodeId::new(3)];
        let own = tree.lineage(v(5)).unwrap();

        let err = tree.cut_at(&foreign, &own).unwrap_err();
        assert!(matches!(err, Error::NoCommonAncestor { .. }));
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_rebuild_keeps_arena_order() {
        let mut tree = branching_tree();
        tree.cut_between(v(4), v(1)).unwrap();
        tree.attach(v(6), v(8)).unwrap();

        for (id, node) in tree.iter() {
            for &child in &node.children {
                assert!(child > id);
            }
        }
    }

    #[test]
    fn test_has_descendant_factory() {
        let mut tree = branching_tree();
        let one = tree.node_of(v(1)).unwrap();
        let three = tree.node_of(v(3)).unwrap();

        assert!(!tree.has_descendant_factory(one));

        tree.mark_factory(v(4)).unwrap();
        assert!(tree.has_descendant_factory(one));
        assert!(!tree.has_descendant_factory(three));
    }

    #[test]
    fn test_within_build_range_always() {
        let tree = branching_tree();
        for (id, _) in tree.iter() {
            assert!(tree.within_build_range(id));
        }
    }
}
