//! NodeStore - append-only arena of directory nodes.
//!
//! Nodes reference their parent by `NodeId`; there are no child or sibling
//! links. Paths are reconstructed by walking up the parent chain.

use std::ops::Index;

use super::index_types::NodeId;
use super::node::{DirectoryNode, NodeAttributes};

#[derive(Debug)]
pub struct NodeStore {
    nodes: Vec<DirectoryNode>,
    separator: char,
}

impl NodeStore {
    /// Creates an empty store whose paths are joined with `separator`.
    pub fn new(separator: char) -> Self {
        Self {
            nodes: Vec::new(),
            separator,
        }
    }

    #[inline]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Appends a root node (depth 0, no parent).
    pub fn push_root(&mut self, name: &str, attributes: NodeAttributes) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes
            .push(DirectoryNode::new(None, 0, name.into(), attributes));
        id
    }

    /// Appends a child of `parent` and flags the parent as having children.
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this store.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        name: &str,
        attributes: NodeAttributes,
    ) -> NodeId {
        let parent_node = &mut self.nodes[parent.get()];
        parent_node.mark_has_children();
        let depth = parent_node.depth() + 1;

        let id = NodeId::new(self.nodes.len());
        self.nodes
            .push(DirectoryNode::new(Some(parent), depth, name.into(), attributes));
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&DirectoryNode> {
        self.nodes.get(id.get())
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(DirectoryNode::parent)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DirectoryNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    /// Rebuilds the full path of a node from its parent chain.
    ///
    /// Returns `None` if the node doesn't belong to this store.
    pub fn full_path(&self, id: NodeId) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.get(id)?;
            segments.push(node.name());
            current = node.parent();
        }

        let mut path = String::new();
        for segment in segments.into_iter().rev() {
            if !path.is_empty() && !path.ends_with(self.separator) {
                path.push(self.separator);
            }
            path.push_str(segment);
        }
        Some(path)
    }
}

impl Index<NodeId> for NodeStore {
    type Output = DirectoryNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.get()]
    }
}
