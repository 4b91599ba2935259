//! Index building.
//!
//! - `enumerate`: the directory enumeration seam (`std::fs` and in-memory)
//! - `scan`: recursive, epoch-cancellable scan into a fresh generation
//! - `generation`: one immutable snapshot (node arena + name bag)
//! - `build`: build state, outcome and progress counters
//! - `shared`: state shared between the facade and build workers

mod build;
mod enumerate;
mod generation;
mod scan;
mod shared;

pub use build::{
    unix_now_secs, BuildOutcome, BuildProgress, BuildState, ProgressSnapshot,
};
pub use enumerate::{DirectoryEnumerator, EnumeratedEntry, FsEnumerator, MemoryEnumerator};
pub use generation::Generation;
pub use scan::IndexBuilder;
pub(crate) use shared::SharedIndex;
