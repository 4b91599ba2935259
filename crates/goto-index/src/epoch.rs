//! Scan epochs for cancelling superseded index builds.
//!
//! Every build captures a fresh epoch from `ScanEpoch::advance()`. Starting
//! another build advances the counter again, and the older build notices at
//! its next enumeration step through its `EpochToken`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic counter shared by the index facade and its build workers.
#[derive(Debug, Clone, Default)]
pub struct ScanEpoch {
    active: Arc<AtomicU64>,
}

impl ScanEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the active epoch and returns a token for it.
    ///
    /// Any token handed out earlier stops being current.
    pub fn advance(&self) -> EpochToken {
        let epoch = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        EpochToken {
            active: self.active.clone(),
            epoch,
        }
    }

    /// Returns the active epoch without incrementing.
    pub fn current(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }
}

/// The epoch a single build was started under.
#[derive(Debug, Clone)]
pub struct EpochToken {
    active: Arc<AtomicU64>,
    epoch: u64,
}

impl EpochToken {
    /// A token that is never superseded. Useful for tests and one-off scans.
    pub fn detached() -> Self {
        Self {
            active: Arc::new(AtomicU64::new(0)),
            epoch: 0,
        }
    }

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns `Some(())` while this epoch is still active and `None` once a
    /// newer build has started, so scans can bail out with `?`.
    #[inline]
    pub fn is_current(&self) -> Option<()> {
        if self.active.load(Ordering::SeqCst) == self.epoch {
            Some(())
        } else {
            None
        }
    }
}
