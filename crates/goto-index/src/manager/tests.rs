use std::fs;
use std::io;
use std::sync::mpsc;

use tempfile::tempdir;

use super::*;
use crate::indexer::{EnumeratedEntry, MemoryEnumerator};

fn windows_config() -> GotoConfig {
    GotoConfig::default().with_separator('\\')
}

fn windows_index(paths: &[&str]) -> GotoIndex {
    let tree = MemoryEnumerator::from_paths('\\', paths.iter().copied());
    GotoIndex::with_enumerator(windows_config(), Arc::new(tree)).unwrap()
}

fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("c:\\{prefix}{i:04}")).collect()
}

fn index_of(paths: &[String]) -> GotoIndex {
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    windows_index(&refs)
}

#[test]
fn resolves_words_against_published_tree() {
    let index = windows_index(&["c:\\proj\\alpha\\beta", "c:\\proj\\beta"]);
    let outcome = index.rebuild_blocking("c:\\").unwrap();
    assert!(outcome.is_published());

    assert_eq!(index.resolve("al").paths(), vec!["c:\\proj\\alpha"]);
    assert_eq!(
        index.resolve("beta").paths(),
        vec!["c:\\proj\\alpha\\beta", "c:\\proj\\beta"]
    );
    assert_eq!(
        index.resolve("alpha\\beta").paths(),
        vec!["c:\\proj\\alpha\\beta"]
    );
    assert_eq!(index.resolve("'PROJ\\").paths(), vec!["c:\\proj"]);
}

#[test]
fn ancestor_word_keeps_every_matching_descendant() {
    let index = windows_index(&["c:\\proj\\alpha\\beta", "c:\\proj\\beta"]);
    index.rebuild_blocking("c:\\").unwrap();

    assert_eq!(
        index.resolve("proj beta").paths(),
        vec!["c:\\proj\\alpha\\beta", "c:\\proj\\beta"]
    );
    assert_eq!(
        index.resolve("beta proj").paths(),
        vec!["c:\\proj\\alpha\\beta", "c:\\proj\\beta"]
    );
}

#[test]
fn name_matching_twice_is_suggested_once() {
    let index = windows_index(&["c:\\alpha alps", "c:\\alpine"]);
    index.rebuild_blocking("c:\\").unwrap();

    let suggestions = index.suggestions("al");
    assert_eq!(suggestions.paths, vec!["c:\\alpha alps", "c:\\alpine"]);
    assert_eq!(index.resolve("al alp").len(), 2);
}

#[test]
fn no_index_resolves_empty() {
    let index = windows_index(&["c:\\proj"]);
    assert!(index.resolve("proj").is_empty());
    assert!(index.suggestions("proj").is_empty());
    assert!(index.current_generation().is_none());

    let status = index.status();
    assert_eq!(status.state, "idle");
    assert_eq!(status.epoch, 0);
    assert_eq!(status.published_epoch, None);
    assert_eq!(status.root, None);
}

#[test]
fn blank_text_is_empty() {
    let index = windows_index(&["c:\\proj"]);
    index.rebuild_blocking("c:\\").unwrap();
    assert!(index.resolve("").is_empty());
    assert!(index.resolve(" \t ").is_empty());
}

#[test]
fn per_word_cap_truncates() {
    let index = index_of(&numbered("z", 1500));
    index.rebuild_blocking("c:\\").unwrap();

    let found = index.resolve("z");
    assert_eq!(found.len(), 1000);
    assert!(found.truncated());

    let found = index.resolve_with_limit("z", 2000);
    assert_eq!(found.len(), 1500);
    assert!(!found.truncated());

    let suggestions = index.suggestions("z");
    assert_eq!(suggestions.paths.len(), 10);
    assert_eq!(suggestions.overflow, Some(Overflow::Limited));
    assert_eq!(suggestions.paths[0], "c:\\z0000");
}

#[test]
fn suggestions_mark_more_rows() {
    let index = index_of(&numbered("d", 12));
    index.rebuild_blocking("c:\\").unwrap();

    let suggestions = index.suggestions("d");
    assert_eq!(suggestions.paths.len(), 10);
    assert_eq!(suggestions.overflow, Some(Overflow::More));
    assert_eq!(suggestions.rows().last(), Some(&"... more ..."));

    let suggestions = index.suggestions("d0001");
    assert_eq!(suggestions.paths, vec!["c:\\d0001"]);
    assert_eq!(suggestions.overflow, None);
}

#[test]
fn exactly_display_limit_has_no_marker() {
    let index = index_of(&numbered("e", 10));
    index.rebuild_blocking("c:\\").unwrap();
    let suggestions = index.suggestions("e");
    assert_eq!(suggestions.paths.len(), 10);
    assert_eq!(suggestions.overflow, None);
}

#[test]
fn background_build_publishes() {
    let index = windows_index(&["c:\\proj\\alpha"]);
    index.start_rebuild("c:\\").unwrap();
    index.wait_for_builds();

    assert_eq!(index.state(), BuildState::Published);
    let status = index.status();
    assert_eq!(status.state, "published");
    assert_eq!(status.epoch, 1);
    assert_eq!(status.published_epoch, Some(1));
    assert_eq!(status.root.as_deref(), Some("c:\\"));
    assert_eq!(status.nodes, 3);
    assert_eq!(status.scanned_dirs, 3);
    assert!(status.finished_at.is_some());
    assert_eq!(status.last_error, None);
    assert_eq!(index.resolve("alpha").paths(), vec!["c:\\proj\\alpha"]);
}

/// Blocks the first enumeration of `gate` until the test releases it.
struct GatedEnumerator {
    inner: MemoryEnumerator,
    gate: String,
    entered: Mutex<Option<mpsc::Sender<()>>>,
    release: Mutex<Option<mpsc::Receiver<()>>>,
}

impl DirectoryEnumerator for GatedEnumerator {
    fn enumerate(&self, path: &str) -> io::Result<Vec<EnumeratedEntry>> {
        if path == self.gate {
            let entered = self.entered.lock().take();
            if let Some(entered) = entered {
                let release = self.release.lock().take();
                entered.send(()).unwrap();
                if let Some(release) = release {
                    release.recv().unwrap();
                }
            }
        }
        self.inner.enumerate(path)
    }
}

#[test]
fn newer_build_supersedes_running_one() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let tree = GatedEnumerator {
        inner: MemoryEnumerator::from_paths('\\', ["c:\\proj\\alpha", "c:\\proj\\beta"]),
        gate: "c:\\".to_string(),
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(Some(release_rx)),
    };
    let index = GotoIndex::with_enumerator(windows_config(), Arc::new(tree)).unwrap();

    index.start_rebuild("c:\\").unwrap();
    entered_rx.recv().unwrap();

    // The first build is parked inside its root enumeration.
    assert_eq!(index.state(), BuildState::Scanning);
    index.start_rebuild("c:\\").unwrap();
    release_tx.send(()).unwrap();
    index.wait_for_builds();

    let status = index.status();
    assert_eq!(status.epoch, 2);
    assert_eq!(status.published_epoch, Some(2));
    assert_eq!(status.state, "published");
    assert_eq!(index.current_generation().unwrap().epoch(), 2);
    assert_eq!(index.resolve("beta").paths(), vec!["c:\\proj\\beta"]);
}

#[test]
fn status_follows_newest_of_concurrent_starts() {
    let roots: Vec<String> = (0..8).map(|i| format!("{}:\\", (b'c' + i) as char)).collect();
    let mut tree = MemoryEnumerator::new('\\');
    for root in &roots {
        tree.add_dir(&format!("{root}data"));
    }
    let index = GotoIndex::with_enumerator(windows_config(), Arc::new(tree)).unwrap();

    std::thread::scope(|scope| {
        for root in &roots {
            let index = &index;
            scope.spawn(move || {
                for _ in 0..4 {
                    index.start_rebuild(root).unwrap();
                }
            });
        }
    });
    index.wait_for_builds();

    let status = index.status();
    let generation = index.current_generation().unwrap();
    assert_eq!(status.epoch, 32);
    assert_eq!(status.state, "published");
    assert_eq!(status.published_epoch, Some(32));
    assert_eq!(status.root.as_deref(), Some(generation.root_path()));
    assert_eq!(status.last_error, None);
}

#[test]
fn superseded_build_leaves_newer_status_alone() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let tree = GatedEnumerator {
        inner: MemoryEnumerator::from_paths('\\', ["c:\\old", "d:\\new"]),
        gate: "c:\\".to_string(),
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(Some(release_rx)),
    };
    let index = GotoIndex::with_enumerator(windows_config(), Arc::new(tree)).unwrap();

    index.start_rebuild("c:\\").unwrap();
    entered_rx.recv().unwrap();
    index.rebuild_blocking("d:\\").unwrap();
    release_tx.send(()).unwrap();
    index.wait_for_builds();

    let status = index.status();
    assert_eq!(status.state, "published");
    assert_eq!(status.root.as_deref(), Some("d:\\"));
    assert_eq!(status.published_epoch, Some(2));
    assert_eq!(index.resolve("new").paths(), vec!["d:\\new"]);
    assert!(index.resolve("old").is_empty());
}

#[test]
fn failed_rebuild_keeps_previous_generation() {
    let index = windows_index(&["c:\\proj"]);
    index.rebuild_blocking("c:\\").unwrap();

    let error = index.rebuild_blocking("d:\\").unwrap_err();
    assert!(matches!(error, GotoError::Io(_)));

    let status = index.status();
    assert_eq!(status.state, "failed");
    assert_eq!(status.epoch, 2);
    assert_eq!(status.published_epoch, Some(1));
    assert!(status.last_error.is_some());
    assert_eq!(index.resolve("proj").paths(), vec!["c:\\proj"]);

    // A later successful build clears the error.
    index.rebuild_blocking("c:\\").unwrap();
    let status = index.status();
    assert_eq!(status.state, "published");
    assert_eq!(status.last_error, None);
}

#[test]
fn background_failure_is_reported_in_status() {
    let index = windows_index(&["c:\\proj"]);
    index.start_rebuild("q:\\").unwrap();
    index.wait_for_builds();

    let status = index.status();
    assert_eq!(status.state, "failed");
    assert!(status.last_error.unwrap().contains("q:"));
    assert!(index.resolve("proj").is_empty());
}

struct PanickingEnumerator;

impl DirectoryEnumerator for PanickingEnumerator {
    fn enumerate(&self, _path: &str) -> io::Result<Vec<EnumeratedEntry>> {
        panic!("enumerator exploded");
    }
}

#[test]
fn worker_panic_marks_build_failed() {
    let index = GotoIndex::with_enumerator(windows_config(), Arc::new(PanickingEnumerator)).unwrap();
    index.start_rebuild("c:\\").unwrap();
    index.wait_for_builds();

    let status = index.status();
    assert_eq!(status.state, "failed");
    let message = status.last_error.unwrap();
    assert!(message.contains("panic during build"));
    assert!(message.contains("enumerator exploded"));
}

#[test]
fn invalid_config_is_rejected() {
    let error = GotoIndex::new(GotoConfig::default().with_display_limit(0)).unwrap_err();
    assert!(matches!(error, GotoError::InvalidConfig(_)));
}

#[test]
fn confirm_prefers_selection_only_if_directory() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("target");
    let file = temp.path().join("notes.txt");
    fs::create_dir(&dir).unwrap();
    fs::write(&file, "x").unwrap();
    let dir = dir.to_str().unwrap();
    let file = file.to_str().unwrap();

    let index = GotoIndex::new(GotoConfig::default()).unwrap();
    assert_eq!(index.confirm("ignored", Some(dir)).as_deref(), Some(dir));
    // A stale selection does not fall back to the typed text.
    assert_eq!(index.confirm(dir, Some(file)), None);
    assert_eq!(index.confirm(&format!("  {dir} "), None).as_deref(), Some(dir));
    assert_eq!(index.confirm(file, None), None);
    assert_eq!(index.confirm("", None), None);
}

#[test]
fn scans_real_directories() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("Workspace").join("goto target")).unwrap();
    fs::create_dir_all(temp.path().join("other")).unwrap();
    fs::write(temp.path().join("target.txt"), "not a dir").unwrap();
    let root = temp.path().to_str().unwrap();

    let index = GotoIndex::new(GotoConfig::default()).unwrap();
    index.rebuild_blocking(root).unwrap();

    let separator = std::path::MAIN_SEPARATOR;
    let found = index.resolve("target");
    assert_eq!(found.len(), 1);
    let path = &found.paths()[0];
    assert!(path.ends_with(&format!("Workspace{separator}goto target")));
    assert!(Path::new(path).is_dir());
    assert_eq!(index.confirm("", Some(path)).as_deref(), Some(path.as_str()));
    assert_eq!(index.resolve("work got").len(), 1);
}
