//! Recursive directory scan that builds a fresh generation.
//!
//! The scan runs depth-first from the root. Each live subdirectory becomes a
//! node parented to its directory and is inserted into the bag once per
//! whitespace-separated word of its name. Before every entry the builder
//! checks its epoch token; once a newer build has started, the scan unwinds
//! and the partial generation is dropped.

use std::sync::atomic::Ordering;
use std::time::Instant;

use super::build::BuildProgress;
use super::enumerate::{DirectoryEnumerator, EnumeratedEntry};
use super::generation::Generation;
use crate::config::{is_query_separator, GotoConfig};
use crate::epoch::EpochToken;
use crate::error::{path_too_long, Result};
use crate::storage::{NodeAttributes, NodeId, NodeStore, PrefixBag};

pub struct IndexBuilder<'a> {
    enumerator: &'a dyn DirectoryEnumerator,
    config: &'a GotoConfig,
    token: EpochToken,
    progress: Option<&'a BuildProgress>,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(
        enumerator: &'a dyn DirectoryEnumerator,
        config: &'a GotoConfig,
        token: EpochToken,
    ) -> Self {
        Self {
            enumerator,
            config,
            token,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: &'a BuildProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Scans the tree under `root`.
    ///
    /// Returns `Ok(None)` if the build was superseded before it finished and
    /// an error if the root itself cannot be enumerated.
    pub fn build(&self, root: &str) -> Result<Option<Generation>> {
        let started = Instant::now();
        let separator = self.config.separator;
        let root_name = root_node_name(root, separator);
        let root_len = root_name.chars().count();
        if root_len > self.config.max_path_len {
            return Err(path_too_long(&root_name, root_len, self.config.max_path_len));
        }

        if self.token.is_current().is_none() {
            return Ok(None);
        }
        let entries = self.enumerator.enumerate(&root_name)?;

        let mut nodes = NodeStore::new(separator);
        let bag = PrefixBag::new();
        let root_id = nodes.push_root(&root_name, NodeAttributes::DIRECTORY);
        bag.insert(&root_name, root_id);
        self.bump(|progress| &progress.scanned_dirs);

        let mut path = root_name.clone();
        if self
            .scan_dir(&mut nodes, &bag, &mut path, root_len, root_id, entries)
            .is_none()
        {
            log::debug!(
                "goto index build aborted root={} epoch={} nodes={} elapsed_ms={}",
                root_name,
                self.token.epoch(),
                nodes.len(),
                started.elapsed().as_millis(),
            );
            return Ok(None);
        }

        bag.finalize_sort();
        log::info!(
            "goto index built root={} epoch={} nodes={} entries={} elapsed_ms={}",
            root_name,
            self.token.epoch(),
            nodes.len(),
            bag.len(),
            started.elapsed().as_millis(),
        );

        Ok(Some(Generation::new(self.token.epoch(), root_id, nodes, bag)))
    }

    /// Adds the subdirectories in `entries` below `parent` and recurses.
    ///
    /// `path` holds the full path of `parent` (`path_len` characters) and is
    /// restored before returning. Returns `None` when the epoch moved on.
    fn scan_dir(
        &self,
        nodes: &mut NodeStore,
        bag: &PrefixBag<NodeId>,
        path: &mut String,
        path_len: usize,
        parent: NodeId,
        entries: Vec<EnumeratedEntry>,
    ) -> Option<()> {
        let separator = self.config.separator;
        let needs_separator = !path.ends_with(separator);
        let base = path.len();

        for entry in entries {
            self.token.is_current()?;

            if !entry.is_directory() || entry.is_dot_dir() || entry.is_reparse_point() {
                continue;
            }

            let child_len = path_len + usize::from(needs_separator) + entry.name.chars().count();
            if child_len > self.config.max_path_len {
                let error = path_too_long(
                    &format!("{path}{separator}{}", entry.name),
                    child_len,
                    self.config.max_path_len,
                );
                log::debug!("goto index skipped entry: {error}");
                self.bump(|progress| &progress.skipped);
                continue;
            }

            if needs_separator {
                path.push(separator);
            }
            path.push_str(&entry.name);

            let id = nodes.push_child(parent, &entry.name, entry.attributes);
            for word in entry.name.split_whitespace() {
                bag.insert(word, id);
            }
            self.bump(|progress| &progress.scanned_dirs);

            let scanned = match self.enumerator.enumerate(path) {
                Ok(children) => self.scan_dir(nodes, bag, path, child_len, id, children),
                Err(error) => {
                    log::debug!("goto index cannot enumerate {path}: {error}");
                    self.bump(|progress| &progress.errors);
                    Some(())
                }
            };
            path.truncate(base);
            scanned?;
        }

        Some(())
    }

    fn bump<F>(&self, counter: F)
    where
        F: Fn(&BuildProgress) -> &std::sync::atomic::AtomicUsize,
    {
        if let Some(progress) = self.progress {
            counter(progress).fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// The root node is named by its full path with exactly one trailing
/// separator (`c:\`, `/`, `/home/user/`).
pub(crate) fn root_node_name(root: &str, separator: char) -> String {
    let mut name = root
        .trim_end_matches(|ch: char| ch == separator || is_query_separator(ch))
        .to_string();
    name.push(separator);
    name
}
