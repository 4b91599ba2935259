//! State shared between the index facade and its build workers.

use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use parking_lot::Mutex;

use super::build::{BuildProgress, BuildState};
use crate::epoch::{EpochToken, ScanEpoch};
use crate::index_store::IndexStore;

#[derive(Debug, Default)]
pub struct SharedIndex {
    /// Advanced once per started build.
    pub epoch: ScanEpoch,
    /// The published generation.
    pub store: IndexStore,
    /// State of the most recently started build.
    pub build_state: AtomicU8,
    /// Progress of the most recently started build.
    pub build_progress: Mutex<Arc<BuildProgress>>,
    /// Root of the most recently started build.
    pub build_root: Mutex<Option<String>>,
    /// Last build error message.
    pub build_last_error: Mutex<Option<String>>,
    /// Serializes epoch changes with the per-build fields above.
    bookkeeping: Mutex<()>,
}

impl SharedIndex {
    pub fn state(&self) -> BuildState {
        BuildState::load(&self.build_state)
    }

    /// Starts a new epoch and resets the per-build fields for it.
    pub fn begin_build(&self, root: &str) -> (EpochToken, Arc<BuildProgress>) {
        let _guard = self.bookkeeping.lock();
        let token = self.epoch.advance();
        let progress = Arc::new(BuildProgress::started_now());
        *self.build_progress.lock() = progress.clone();
        *self.build_root.lock() = Some(root.to_string());
        *self.build_last_error.lock() = None;
        BuildState::Scanning.store(&self.build_state);
        (token, progress)
    }

    /// Runs `update` only if `token` is still the newest build.
    ///
    /// No other build can begin while `update` runs.
    pub fn if_current<R>(&self, token: &EpochToken, update: impl FnOnce() -> R) -> Option<R> {
        let _guard = self.bookkeeping.lock();
        token.is_current()?;
        Some(update())
    }

    /// Records a failure for the build holding `token`, unless superseded.
    pub fn fail_build(&self, token: &EpochToken, message: String) -> bool {
        self.if_current(token, || {
            *self.build_last_error.lock() = Some(message);
            BuildState::Failed.store(&self.build_state);
        })
        .is_some()
    }

    pub fn progress(&self) -> Arc<BuildProgress> {
        self.build_progress.lock().clone()
    }

    /// Reads the per-build fields without a build starting in between.
    pub fn with_snapshot<R>(&self, read: impl FnOnce() -> R) -> R {
        let _guard = self.bookkeeping.lock();
        read()
    }
}
