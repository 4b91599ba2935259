//! Storage layer for one index generation.
//!
//! - `NodeStore`: append-only arena of parent-linked directory nodes
//! - `PrefixBag`: sorted, case-folded name fragments pointing at nodes

mod bag;
mod index_types;
mod node;
mod store;

pub use bag::{fold_case, PrefixBag};
pub use index_types::{NodeId, OptionNodeId};
pub use node::{DirectoryNode, NodeAttributes};
pub use store::NodeStore;
