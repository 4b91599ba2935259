//! Path ordering between nodes of one `NodeStore`.
//!
//! Comparing two nodes walks their parent chains instead of building full
//! path strings. Besides the usual before/after verdict the comparison tells
//! whether one node is an ancestor of the other.

use std::cmp::Ordering;

use crate::storage::{NodeId, NodeStore};

/// Relationship between two nodes' paths, read as "`a` is ... `b`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeOrder {
    /// Paths diverge and `a` sorts first.
    Less,
    /// `a` is a strict ancestor of `b`.
    Ancestor,
    /// Same path (compared case-insensitively).
    Equal,
    /// `a` is a strict descendant of `b`.
    Descendant,
    /// Paths diverge and `a` sorts last.
    Greater,
}

impl TreeOrder {
    /// The verdict with the operands swapped.
    pub fn reverse(self) -> Self {
        match self {
            Self::Less => Self::Greater,
            Self::Ancestor => Self::Descendant,
            Self::Equal => Self::Equal,
            Self::Descendant => Self::Ancestor,
            Self::Greater => Self::Less,
        }
    }

    /// Projects onto a total order in which ancestors sort right before
    /// their descendants.
    pub fn to_ordering(self) -> Ordering {
        match self {
            Self::Less | Self::Ancestor => Ordering::Less,
            Self::Equal => Ordering::Equal,
            Self::Descendant | Self::Greater => Ordering::Greater,
        }
    }
}

impl From<Ordering> for TreeOrder {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Less,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::Greater,
        }
    }
}

/// Case-insensitive name comparison without allocating.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Compares the paths of `a` and `b`. O(depth).
///
/// # Panics
/// Panics if either node does not belong to `store`.
pub fn compare(store: &NodeStore, a: NodeId, b: NodeId) -> TreeOrder {
    let depth_a = store[a].depth();
    let depth_b = store[b].depth();

    if depth_a == depth_b {
        return compare_same_depth(store, a, b).into();
    }

    let shared = depth_a.min(depth_b);
    let trimmed_a = ancestor_at_depth(store, a, shared);
    let trimmed_b = ancestor_at_depth(store, b, shared);

    match compare_same_depth(store, trimmed_a, trimmed_b) {
        Ordering::Equal if depth_a < depth_b => TreeOrder::Ancestor,
        Ordering::Equal => TreeOrder::Descendant,
        diverged => diverged.into(),
    }
}

/// Total order used to sort candidate lists.
#[inline]
pub fn cmp_nodes(store: &NodeStore, a: NodeId, b: NodeId) -> Ordering {
    compare(store, a, b).to_ordering()
}

/// Compares two nodes of equal depth.
///
/// Walks both chains up in lockstep until they meet (or both reach a root).
/// The name difference closest to the root decides.
fn compare_same_depth(store: &NodeStore, a: NodeId, b: NodeId) -> Ordering {
    let mut verdict = Ordering::Equal;
    let (mut x, mut y) = (a, b);

    while x != y {
        let (node_x, node_y) = (&store[x], &store[y]);
        let names = compare_names(node_x.name(), node_y.name());
        if names != Ordering::Equal {
            verdict = names;
        }
        match (node_x.parent(), node_y.parent()) {
            (Some(parent_x), Some(parent_y)) => {
                x = parent_x;
                y = parent_y;
            }
            _ => break,
        }
    }

    verdict
}

fn ancestor_at_depth(store: &NodeStore, mut id: NodeId, depth: u32) -> NodeId {
    while store[id].depth() > depth {
        match store[id].parent() {
            Some(parent) => id = parent,
            None => break,
        }
    }
    id
}
