//! One complete scan snapshot.

use crate::storage::{DirectoryNode, NodeId, NodeStore, PrefixBag};

/// Node arena plus the name bag that points into it.
///
/// A generation is immutable once built; the bag only references nodes of
/// the same generation. It is shared behind an `Arc` and dropped when the
/// last query holding it finishes.
#[derive(Debug)]
pub struct Generation {
    epoch: u64,
    root: NodeId,
    nodes: NodeStore,
    bag: PrefixBag<NodeId>,
}

impl Generation {
    pub(crate) fn new(epoch: u64, root: NodeId, nodes: NodeStore, bag: PrefixBag<NodeId>) -> Self {
        Self {
            epoch,
            root,
            nodes,
            bag,
        }
    }

    /// Epoch of the build that produced this generation.
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Full path of the scan root, separator-terminated.
    pub fn root_path(&self) -> &str {
        self.nodes[self.root].name()
    }

    #[inline]
    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&DirectoryNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn entry_count(&self) -> usize {
        self.bag.len()
    }

    pub fn full_path(&self, id: NodeId) -> Option<String> {
        self.nodes.full_path(id)
    }

    /// Looks up one name fragment in the bag.
    pub fn retrieve(&self, fragment: &str, prefix_mode: bool, max_results: usize) -> Vec<NodeId> {
        self.bag.retrieve(fragment, prefix_mode, max_results)
    }
}
