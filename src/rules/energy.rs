//! Energy accrual.
//!
//! At the start of its turn a side collects energy from each of its
//! factories:
//! - a factory with another factory anywhere below one of its children
//!   yields exactly 1
//! - otherwise it yields one unit per direct child (0 when childless)
//!
//! Chained factories therefore give diminishing returns, while a single
//! factory with many branches pays well.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::VertexId;
use crate::network::{NetworkNode, NetworkTree, NodeId};

/// Energy collected from one network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyYield {
    /// Sum over all factories.
    pub total: u32,

    /// Contribution of each factory, in arena order.
    pub factories: SmallVec<[(VertexId, u32); 4]>,
}

/// Yield of a single node if it were a factory.
///
/// Per-node query for callers inspecting one factory, such as a renderer
/// showing what a vertex would pay. Walks the subtree; `collect_energy`
/// gives the same numbers for a whole network in one pass.
#[must_use]
pub fn factory_yield(tree: &NetworkTree, id: NodeId) -> u32 {
    let node = tree.get(id);
    let chained = node.children.iter().any(|&c| tree.has_descendant_factory(c));
    yield_of(node, chained)
}

fn yield_of(node: &NetworkNode, chained: bool) -> u32 {
    if chained {
        1
    } else {
        node.child_count() as u32
    }
}

/// Energy a network produces this turn.
///
/// One bottom-up pass over the arena; children always follow their parent.
#[must_use]
pub fn collect_energy(tree: &NetworkTree) -> EnergyYield {
    let mut subtree_has_factory = vec![false; tree.len()];
    for (id, node) in tree.iter().rev() {
        subtree_has_factory[id.raw() as usize] =
            node.is_factory || node.children.iter().any(|c| subtree_has_factory[c.raw() as usize]);
    }

    let mut result = EnergyYield::default();
    for (_, node) in tree.iter().filter(|(_, n)| n.is_factory) {
        let chained = node.children.iter().any(|c| subtree_has_factory[c.raw() as usize]);
        let amount = yield_of(node, chained);
        result.total += amount;
        result.factories.push((node.vertex, amount));
    }
    result
}
