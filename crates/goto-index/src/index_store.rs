//! Holder of the published generation.
//!
//! Readers clone the `Arc` out under a short read lock and then query without
//! any further synchronization; publishing swaps the pointer under the write
//! lock. A superseded generation lives on until the last reader drops it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::epoch::EpochToken;
use crate::indexer::Generation;

/// Result of handing a finished generation to the store.
#[derive(Debug)]
pub enum Publication {
    /// The generation is live; `previous` is the one it replaced.
    Published { previous: Option<Arc<Generation>> },
    /// A newer build started (or already published) first.
    Superseded,
}

#[derive(Debug, Default)]
pub struct IndexStore {
    current: RwLock<Option<Arc<Generation>>>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live generation, if any build has been published.
    pub fn current(&self) -> Option<Arc<Generation>> {
        self.current.read().clone()
    }

    /// Swaps `generation` in unconditionally and returns the previous one.
    pub fn publish(&self, generation: Arc<Generation>) -> Option<Arc<Generation>> {
        self.current.write().replace(generation)
    }

    /// Publishes `generation` only if `token` is still the active epoch.
    ///
    /// The epoch is re-checked under the write lock, so a build superseded
    /// between finishing its scan and publishing never becomes visible. A
    /// generation older than the live one is refused as well.
    pub fn publish_if_current(&self, token: &EpochToken, generation: Generation) -> Publication {
        let mut current = self.current.write();
        if token.is_current().is_none() {
            return Publication::Superseded;
        }
        if current
            .as_ref()
            .is_some_and(|live| live.epoch() > generation.epoch())
        {
            return Publication::Superseded;
        }
        let previous = current.replace(Arc::new(generation));
        Publication::Published { previous }
    }

    /// Drops the live generation, returning it.
    pub fn clear(&self) -> Option<Arc<Generation>> {
        self.current.write().take()
    }
}
