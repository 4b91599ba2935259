//! Goto-directory index.
//!
//! This crate keeps an in-memory index of every directory under one root and
//! resolves typed fragments into candidate directories:
//! - Parent-linked node arena plus a sorted, case-folded prefix bag
//! - Background rebuilds cancelled by epoch and published atomically
//! - Multi-word queries intersected along the directory tree order

pub mod config;
pub mod epoch;
pub mod error;
pub mod index_store;
pub mod indexer;
pub mod manager;
pub mod query;
pub mod storage;
pub mod tree;
pub mod types;

// Re-export main types
pub use config::GotoConfig;
pub use epoch::{EpochToken, ScanEpoch};
pub use error::{GotoError, Result};
pub use index_store::{IndexStore, Publication};
pub use indexer::{
    BuildOutcome, BuildState, DirectoryEnumerator, EnumeratedEntry, FsEnumerator, Generation,
    IndexBuilder, MemoryEnumerator,
};
pub use manager::GotoIndex;
pub use query::{parse_words, resolve, Resolution, WordPattern};
pub use storage::{NodeAttributes, NodeId, NodeStore, PrefixBag};
pub use tree::{intersect, TreeOrder};
pub use types::{IndexStatus, Overflow, Suggestions};
