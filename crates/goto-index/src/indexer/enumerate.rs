//! Directory enumeration seam.
//!
//! The scanner never touches the filesystem directly; it asks a
//! `DirectoryEnumerator` for the entries of one directory at a time. Paths
//! are passed as the strings the scanner assembled, using the configured
//! separator.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::storage::NodeAttributes;

/// One entry reported by an enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratedEntry {
    pub name: String,
    pub attributes: NodeAttributes,
}

impl EnumeratedEntry {
    pub fn new(name: impl Into<String>, attributes: NodeAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, NodeAttributes::DIRECTORY)
    }

    #[inline]
    pub fn is_directory(&self) -> bool {
        self.attributes.contains(NodeAttributes::DIRECTORY)
    }

    #[inline]
    pub fn is_reparse_point(&self) -> bool {
        self.attributes.contains(NodeAttributes::REPARSE_POINT)
    }

    /// The `.` and `..` pseudo-entries some platforms report.
    #[inline]
    pub fn is_dot_dir(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

pub trait DirectoryEnumerator: Send + Sync {
    /// Lists the entries directly inside `path`.
    fn enumerate(&self, path: &str) -> io::Result<Vec<EnumeratedEntry>>;
}

/// Enumerates the real filesystem with `std::fs::read_dir`.
///
/// Symlinks are never followed; they (and Windows reparse points) are
/// reported with `REPARSE_POINT` so the scanner can skip them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEnumerator;

impl DirectoryEnumerator for FsEnumerator {
    fn enumerate(&self, path: &str) -> io::Result<Vec<EnumeratedEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(Path::new(path))? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    log::debug!("goto enumerate skipped entry in {path}: {error}");
                    continue;
                }
            };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let name = entry.file_name().to_string_lossy().into_owned();

            let mut attributes = NodeAttributes::empty();
            if file_type.is_dir() {
                attributes |= NodeAttributes::DIRECTORY;
            }
            if file_type.is_symlink() {
                attributes |= NodeAttributes::REPARSE_POINT;
                if fs::metadata(entry.path()).is_ok_and(|metadata| metadata.is_dir()) {
                    attributes |= NodeAttributes::DIRECTORY;
                }
            }
            if is_reparse_point(&entry) {
                attributes |= NodeAttributes::REPARSE_POINT;
            }

            entries.push(EnumeratedEntry { name, attributes });
        }
        Ok(entries)
    }
}

/// Windows reports junctions and mount points as reparse points even when
/// `file_type` calls them plain directories.
#[cfg(windows)]
fn is_reparse_point(entry: &fs::DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_REPARSE_POINT: u32 = 0x400;

    entry
        .metadata()
        .is_ok_and(|metadata| metadata.file_attributes() & FILE_ATTRIBUTE_REPARSE_POINT != 0)
}

#[cfg(not(windows))]
fn is_reparse_point(_entry: &fs::DirEntry) -> bool {
    false
}

/// In-memory directory tree, for hosts that already hold enumeration results
/// and for deterministic tests.
#[derive(Debug, Clone)]
pub struct MemoryEnumerator {
    separator: char,
    dirs: BTreeMap<String, Vec<EnumeratedEntry>>,
}

impl MemoryEnumerator {
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            dirs: BTreeMap::new(),
        }
    }

    /// Builds a tree containing every directory in `paths` and their parents.
    pub fn from_paths<I, S>(separator: char, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new(separator);
        for path in paths {
            tree.add_dir(path.as_ref());
        }
        tree
    }

    /// Registers a directory (and its missing ancestors).
    pub fn add_dir(&mut self, path: &str) -> &mut Self {
        let key = self.key(path).to_string();
        self.dirs.entry(key.clone()).or_default();

        if let Some((parent, name)) = key.rsplit_once(self.separator) {
            let parent = parent.to_string();
            let name = name.to_string();
            if !parent.is_empty() {
                self.add_dir(&parent);
            }
            self.push_entry(&parent, EnumeratedEntry::directory(name));
        }
        self
    }

    /// Adds a raw entry under `dir`, e.g. a file or a reparse point.
    pub fn add_entry(&mut self, dir: &str, entry: EnumeratedEntry) -> &mut Self {
        let key = self.key(dir).to_string();
        self.push_entry(&key, entry);
        self
    }

    fn push_entry(&mut self, dir: &str, entry: EnumeratedEntry) {
        let entries = self.dirs.entry(dir.to_string()).or_default();
        if !entries.iter().any(|existing| existing.name == entry.name) {
            entries.push(entry);
        }
    }

    fn key<'a>(&self, path: &'a str) -> &'a str {
        path.trim_end_matches(self.separator)
    }
}

impl DirectoryEnumerator for MemoryEnumerator {
    fn enumerate(&self, path: &str) -> io::Result<Vec<EnumeratedEntry>> {
        self.dirs.get(self.key(path)).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such directory: {path}"))
        })
    }
}
