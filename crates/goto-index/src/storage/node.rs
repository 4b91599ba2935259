//! Directory node representation.

use bitflags::bitflags;

use super::index_types::{NodeId, OptionNodeId};

bitflags! {
    /// Attribute bits reported by enumeration and kept on nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeAttributes: u8 {
        const DIRECTORY = 0b0001;
        /// Set on a node once a child has been created under it.
        const HAS_CHILDREN = 0b0010;
        /// Symlink, junction or other reparse point. Only meaningful during
        /// the scan; never stored on a node.
        const REPARSE_POINT = 0b0100;
    }
}

impl NodeAttributes {
    /// Attributes that survive onto a stored node.
    #[inline]
    pub fn stored(self) -> Self {
        self.difference(Self::REPARSE_POINT)
    }
}

/// A directory in one generation's arena.
///
/// Nodes link only to their parent. The full path is rebuilt on demand by
/// walking the parent chain (see `NodeStore::full_path`).
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    parent: OptionNodeId,
    depth: u32,
    name: Box<str>,
    attributes: NodeAttributes,
}

impl DirectoryNode {
    pub(crate) fn new(
        parent: Option<NodeId>,
        depth: u32,
        name: Box<str>,
        attributes: NodeAttributes,
    ) -> Self {
        Self {
            parent: OptionNodeId::from_option(parent),
            depth,
            name,
            attributes: attributes.stored(),
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.to_option()
    }

    /// Number of parent links to the root (0 for the root itself).
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn attributes(&self) -> NodeAttributes {
        self.attributes
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.attributes.contains(NodeAttributes::HAS_CHILDREN)
    }

    #[inline]
    pub(crate) fn mark_has_children(&mut self) {
        self.attributes.insert(NodeAttributes::HAS_CHILDREN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reparse_marker_is_not_stored() {
        let node = DirectoryNode::new(
            None,
            0,
            "link".into(),
            NodeAttributes::DIRECTORY | NodeAttributes::REPARSE_POINT,
        );
        assert_eq!(node.attributes(), NodeAttributes::DIRECTORY);
    }

    #[test]
    fn only_scan_and_tree_flags_exist() {
        assert_eq!(
            NodeAttributes::all(),
            NodeAttributes::DIRECTORY | NodeAttributes::HAS_CHILDREN | NodeAttributes::REPARSE_POINT
        );
        assert_eq!(
            NodeAttributes::all().stored(),
            NodeAttributes::DIRECTORY | NodeAttributes::HAS_CHILDREN
        );
    }

    #[test]
    fn has_children_flag() {
        let mut node = DirectoryNode::new(
            Some(NodeId::new(3)),
            1,
            "src".into(),
            NodeAttributes::DIRECTORY,
        );
        assert!(!node.has_children());
        node.mark_has_children();
        assert!(node.has_children());
        assert_eq!(node.parent(), Some(NodeId::new(3)));
        assert_eq!(node.depth(), 1);
        assert_eq!(node.name(), "src");
    }
}
