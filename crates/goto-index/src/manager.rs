//! GotoIndex - main API for the goto-directory index.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::config::GotoConfig;
use crate::epoch::EpochToken;
use crate::error::{GotoError, Result};
use crate::index_store::Publication;
use crate::indexer::{
    BuildOutcome, BuildProgress, BuildState, DirectoryEnumerator, FsEnumerator, Generation,
    IndexBuilder, SharedIndex,
};
use crate::query::{parse_words, resolve, Resolution};
use crate::types::{IndexStatus, Overflow, Suggestions};

/// Directory index for one configured root.
///
/// Builds run on a dedicated worker thread and publish a fresh generation
/// when they complete; queries always read the live generation and never
/// wait for a build.
pub struct GotoIndex {
    config: Arc<GotoConfig>,
    enumerator: Arc<dyn DirectoryEnumerator>,
    shared: Arc<SharedIndex>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl std::fmt::Debug for GotoIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GotoIndex")
            .field("config", &self.config)
            .field("shared", &self.shared)
            .field("enumerator", &"<enumerator>")
            .finish()
    }
}

impl GotoIndex {
    /// Creates an index that scans the real filesystem.
    pub fn new(config: GotoConfig) -> Result<Self> {
        Self::with_enumerator(config, Arc::new(FsEnumerator))
    }

    pub fn with_enumerator(
        config: GotoConfig,
        enumerator: Arc<dyn DirectoryEnumerator>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            enumerator,
            shared: Arc::new(SharedIndex::default()),
            workers: Mutex::new(Vec::new()),
        })
    }

    pub fn config(&self) -> &GotoConfig {
        &self.config
    }

    /// Starts a background rebuild of the tree under `root`.
    ///
    /// Any build still running is superseded and will not publish. The only
    /// error surfaced here is a failure to launch the worker; scan failures
    /// are reported through [`GotoIndex::status`].
    pub fn start_rebuild(&self, root: &str) -> Result<()> {
        let (token, progress) = self.shared.begin_build(root);

        let shared = self.shared.clone();
        let enumerator = self.enumerator.clone();
        let config = self.config.clone();
        let worker_token = token.clone();
        let worker_root = root.to_string();

        let spawned = thread::Builder::new()
            .name(self.config.worker_name.clone())
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    run_build(
                        &shared,
                        enumerator.as_ref(),
                        &config,
                        &worker_token,
                        &progress,
                        &worker_root,
                    )
                }));
                if let Err(panic_info) = result {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "build thread panicked".to_string()
                    };
                    progress.mark_finished();
                    log::warn!(
                        "goto index build panicked root={} epoch={}: {}",
                        worker_root,
                        worker_token.epoch(),
                        panic_msg
                    );
                    shared.fail_build(
                        &worker_token,
                        format!("panic during build: {panic_msg}"),
                    );
                }
            });

        match spawned {
            Ok(handle) => {
                let mut workers = self.workers.lock();
                workers.retain(|worker| !worker.is_finished());
                workers.push(handle);
                Ok(())
            }
            Err(error) => {
                log::warn!(
                    "goto index worker launch failed root={} epoch={}: {}",
                    root,
                    token.epoch(),
                    error
                );
                self.shared
                    .fail_build(&token, format!("failed to launch index worker: {error}"));
                Err(GotoError::WorkerLaunch(error))
            }
        }
    }

    /// Blocks until every background build started so far has exited.
    pub fn wait_for_builds(&self) {
        let workers = std::mem::take(&mut *self.workers.lock());
        for worker in workers {
            // Panics are already caught and recorded inside the worker.
            let _ = worker.join();
        }
    }

    /// Runs a rebuild on the calling thread and returns how it ended.
    pub fn rebuild_blocking(&self, root: &str) -> Result<BuildOutcome> {
        let (token, progress) = self.shared.begin_build(root);
        run_build(
            &self.shared,
            self.enumerator.as_ref(),
            &self.config,
            &token,
            &progress,
            root,
        )
    }

    /// Resolves typed text with the configured per-word cap.
    pub fn resolve(&self, text: &str) -> Resolution {
        self.resolve_with_limit(text, self.config.max_per_word)
    }

    /// Resolves typed text against the live generation.
    ///
    /// Returns an empty resolution for blank text or before any build has
    /// published.
    pub fn resolve_with_limit(&self, text: &str, max_per_word: usize) -> Resolution {
        let words = parse_words(text, self.config.exact_marker);
        if words.is_empty() {
            return Resolution::empty();
        }
        let Some(generation) = self.shared.store.current() else {
            return Resolution::empty();
        };
        resolve(&generation, &words, max_per_word)
    }

    /// The first `display_limit` matching paths plus an overflow marker.
    pub fn suggestions(&self, text: &str) -> Suggestions {
        let resolution = self.resolve(text);
        let limit = self.config.display_limit;
        let paths = resolution
            .nodes()
            .iter()
            .take(limit)
            .filter_map(|&id| resolution.full_path(id))
            .collect();
        let overflow = if resolution.truncated() {
            Some(Overflow::Limited)
        } else if resolution.len() > limit {
            Some(Overflow::More)
        } else {
            None
        };
        Suggestions { paths, overflow }
    }

    /// Picks the directory to navigate to when the user confirms.
    ///
    /// A selected suggestion wins when there is one, but only if it is still
    /// a directory. Without a selection the typed text is used if it names a
    /// directory.
    pub fn confirm(&self, typed: &str, selected: Option<&str>) -> Option<String> {
        let candidate = match selected {
            Some(selected) => selected,
            None => typed.trim(),
        };
        if candidate.is_empty() || !Path::new(candidate).is_dir() {
            return None;
        }
        Some(candidate.to_string())
    }

    /// The live generation, if any.
    pub fn current_generation(&self) -> Option<Arc<Generation>> {
        self.shared.store.current()
    }

    pub fn status(&self) -> IndexStatus {
        let (state, epoch, root, last_error, progress, generation) =
            self.shared.with_snapshot(|| {
                (
                    self.shared.state(),
                    self.shared.epoch.current(),
                    self.shared.build_root.lock().clone(),
                    self.shared.build_last_error.lock().clone(),
                    self.shared.progress(),
                    self.shared.store.current(),
                )
            });
        let progress = progress.snapshot();
        IndexStatus {
            state: state.as_str().to_string(),
            epoch,
            published_epoch: generation.as_ref().map(|generation| generation.epoch()),
            root,
            nodes: generation
                .as_ref()
                .map_or(0, |generation| generation.node_count()),
            entries: generation
                .as_ref()
                .map_or(0, |generation| generation.entry_count()),
            scanned_dirs: progress.scanned_dirs,
            skipped: progress.skipped,
            errors: progress.errors,
            started_at: progress.started_at,
            finished_at: progress.finished_at,
            last_error,
        }
    }

    pub fn state(&self) -> BuildState {
        self.shared.state()
    }
}

/// Scans, publishes and records the outcome of one build.
///
/// Shared state is only touched while `token` is still the active epoch; a
/// superseded build leaves it to its successor. The epoch check and the
/// update happen under the shared bookkeeping lock.
fn run_build(
    shared: &SharedIndex,
    enumerator: &dyn DirectoryEnumerator,
    config: &GotoConfig,
    token: &EpochToken,
    progress: &BuildProgress,
    root: &str,
) -> Result<BuildOutcome> {
    let epoch = token.epoch();
    let built = IndexBuilder::new(enumerator, config, token.clone())
        .with_progress(progress)
        .build(root);
    progress.mark_finished();

    let generation = match built {
        Ok(Some(generation)) => generation,
        Ok(None) => return Ok(BuildOutcome::Aborted { epoch }),
        Err(error) => {
            log::warn!("goto index build failed root={} epoch={}: {}", root, epoch, error);
            shared.fail_build(token, error.to_string());
            return Err(error);
        }
    };

    let nodes = generation.node_count();
    let entries = generation.entry_count();
    let publication = shared
        .if_current(token, || {
            let publication = shared.store.publish_if_current(token, generation);
            if matches!(publication, Publication::Published { .. }) {
                BuildState::Published.store(&shared.build_state);
            }
            publication
        })
        .unwrap_or(Publication::Superseded);
    match publication {
        Publication::Published { previous } => {
            log::info!(
                "goto index published root={} epoch={} nodes={} entries={} retired_epoch={:?}",
                root,
                epoch,
                nodes,
                entries,
                previous.as_ref().map(|previous| previous.epoch()),
            );
            Ok(BuildOutcome::Published {
                epoch,
                nodes,
                entries,
            })
        }
        Publication::Superseded => {
            log::debug!("goto index build superseded before publish epoch={}", epoch);
            Ok(BuildOutcome::Aborted { epoch })
        }
    }
}

#[cfg(test)]
mod tests;
