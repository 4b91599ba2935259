//! PrefixBag - sorted, case-folded key/value bag with prefix retrieval.
//!
//! The bag is filled append-only while a generation is being built, sorted
//! once with `finalize_sort`, and then queried. Retrieval remembers where the
//! last lookup started so that typing one more character does not repeat the
//! binary search.

use parking_lot::Mutex;
use rayon::slice::ParallelSliceMut;

/// Lower-cases `text` the same way for keys and queries.
#[inline]
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

#[derive(Debug)]
struct Cursor {
    /// Folded query the cursor was computed for.
    query: String,
    /// Lower bound of `query` in the sorted entries.
    position: usize,
}

#[derive(Debug)]
struct BagInner<V> {
    entries: Vec<(Box<str>, V)>,
    cursor: Option<Cursor>,
}

/// Thread-safe bag of `(folded key, value)` pairs.
///
/// Values are plain copyable handles; the bag never owns what they point to.
/// A single mutex guards the entries and the cursor, so `retrieve` contends
/// with `insert`.
#[derive(Debug)]
pub struct PrefixBag<V> {
    inner: Mutex<BagInner<V>>,
}

impl<V> Default for PrefixBag<V> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(BagInner {
                entries: Vec::new(),
                cursor: None,
            }),
        }
    }
}

impl<V: Copy + Send> PrefixBag<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` under the case-folded `key`.
    pub fn insert(&self, key: &str, value: V) {
        let mut inner = self.inner.lock();
        inner.entries.push((fold_case(key).into_boxed_str(), value));
        inner.cursor = None;
    }

    /// Sorts entries by key. Must run after the last insert and before the
    /// first retrieve.
    pub fn finalize_sort(&self) {
        let mut inner = self.inner.lock();
        inner
            .entries
            .par_sort_unstable_by(|left, right| left.0.cmp(&right.0));
        inner.cursor = None;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Returns up to `max_results` values whose key matches `query`.
    ///
    /// With `prefix_mode` every key starting with the folded query matches;
    /// without it only keys equal to the folded query do. Results come in key
    /// order, so a capped result is the first `max_results` matches in that
    /// order.
    pub fn retrieve(&self, query: &str, prefix_mode: bool, max_results: usize) -> Vec<V> {
        let folded = fold_case(query);
        let mut results = Vec::new();
        if max_results == 0 {
            return results;
        }

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let start = match &inner.cursor {
            Some(cursor)
                if prefix_mode
                    && !cursor.query.is_empty()
                    && folded.starts_with(cursor.query.as_str()) =>
            {
                cursor.position
            }
            _ => {
                let position = inner
                    .entries
                    .partition_point(|(key, _)| key.as_ref() < folded.as_str());
                inner.cursor = Some(Cursor {
                    query: folded.clone(),
                    position,
                });
                position
            }
        };

        for (key, value) in &inner.entries[start..] {
            if key.starts_with(folded.as_str()) {
                if !prefix_mode && key.len() != folded.len() {
                    continue;
                }
                results.push(*value);
                if results.len() >= max_results {
                    break;
                }
            } else if key.as_ref() > folded.as_str() {
                break;
            }
            // Keys sorting before the query only show up when starting from a
            // reused cursor; skip them.
        }

        results
    }
}
