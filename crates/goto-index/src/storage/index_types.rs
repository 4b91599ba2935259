//! Arena index types for directory nodes.

/// A compact 32-bit handle to a node in one generation's `NodeStore`.
///
/// Handles are only meaningful together with the generation that produced
/// them. `u32::MAX` is reserved for `OptionNodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a new NodeId from an arena position.
    ///
    /// # Panics
    /// Panics if `index >= u32::MAX` (reserved for the None sentinel).
    #[inline]
    pub fn new(index: usize) -> Self {
        assert!(
            index < u32::MAX as usize,
            "node index must be less than u32::MAX"
        );
        Self(index as u32)
    }

    /// Returns the arena position.
    #[inline]
    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

/// An optional node handle using `u32::MAX` as the None sentinel.
///
/// Keeps the parent link in `DirectoryNode` at 4 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct OptionNodeId(u32);

impl OptionNodeId {
    #[inline]
    pub fn none() -> Self {
        Self(u32::MAX)
    }

    #[inline]
    pub fn some(id: NodeId) -> Self {
        Self(id.0)
    }

    #[inline]
    pub fn from_option(id: Option<NodeId>) -> Self {
        id.map_or(Self::none(), Self::some)
    }

    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        if self.0 == u32::MAX {
            None
        } else {
            Some(NodeId(self.0))
        }
    }
}

impl Default for OptionNodeId {
    fn default() -> Self {
        Self::none()
    }
}
