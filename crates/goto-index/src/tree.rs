//! Tree-shaped operations over parent-linked nodes.

mod intersection;
mod ordering;

pub use intersection::{filter_by_parent, intersect};
pub use ordering::{cmp_nodes, compare, compare_names, TreeOrder};
