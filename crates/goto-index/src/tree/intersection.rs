//! Merge-intersection of per-word candidate lists.

use fnv::FnvHashSet;
use rayon::prelude::*;

use super::ordering::{cmp_nodes, compare, TreeOrder};
use crate::storage::{NodeId, NodeStore};

/// Intersects candidate lists, one per query word.
///
/// A node survives when every list holds it or one of its relatives: for an
/// ancestor/descendant pair the descendant is kept, and one ancestor can be
/// satisfied by several descendants. The result is sorted by path with
/// ancestors first and holds each node once. Any empty list (or no lists at
/// all) yields an empty result.
pub fn intersect(store: &NodeStore, mut lists: Vec<Vec<NodeId>>) -> Vec<NodeId> {
    if lists.is_empty() || lists.iter().any(Vec::is_empty) {
        return Vec::new();
    }

    // A name with several matching words puts its node in a list more than once.
    lists.par_iter_mut().for_each(|list| {
        let mut seen = FnvHashSet::default();
        list.retain(|&id| seen.insert(id));
        list.sort_by(|a, b| cmp_nodes(store, *a, *b));
    });

    let max_output = lists.iter().map(Vec::len).sum::<usize>();
    let mut lists = lists.into_iter();
    let Some(mut merged) = lists.next() else {
        return Vec::new();
    };

    // `merged` and `scratch` trade places after every fold.
    let mut scratch = Vec::with_capacity(max_output);
    for right in lists {
        scratch.clear();
        merge_into(store, &merged, &right, &mut scratch);
        std::mem::swap(&mut merged, &mut scratch);
        if merged.is_empty() {
            break;
        }
    }

    merged
}

/// One fold of the intersection: linear merge of two sorted lists.
///
/// On an ancestor/descendant pair the descendant is emitted and the
/// descendant side advances, so the ancestor stays available for its later
/// descendants. The ancestor side moves instead when its next element is at
/// least as specific a match for the same descendant.
fn merge_into(store: &NodeStore, left: &[NodeId], right: &[NodeId], out: &mut Vec<NodeId>) {
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        let (l, r) = (left[i], right[j]);
        match compare(store, l, r) {
            TreeOrder::Less => i += 1,
            TreeOrder::Greater => j += 1,
            TreeOrder::Equal => {
                emit(store, out, l);
                i += 1;
                j += 1;
            }
            TreeOrder::Ancestor => {
                emit(store, out, r);
                if next_covers(store, left, i, r) {
                    i += 1;
                } else {
                    j += 1;
                }
            }
            TreeOrder::Descendant => {
                emit(store, out, l);
                if next_covers(store, right, j, l) {
                    j += 1;
                } else {
                    i += 1;
                }
            }
        }
    }
}

/// Whether the element after `list[index]` equals `node` or is its ancestor.
fn next_covers(store: &NodeStore, list: &[NodeId], index: usize, node: NodeId) -> bool {
    list.get(index + 1).is_some_and(|&next| {
        matches!(
            compare(store, next, node),
            TreeOrder::Equal | TreeOrder::Ancestor
        )
    })
}

/// Pushes `node` unless it repeats the last emitted path.
fn emit(store: &NodeStore, out: &mut Vec<NodeId>, node: NodeId) {
    let repeated = out
        .last()
        .is_some_and(|&last| compare(store, last, node) == TreeOrder::Equal);
    if !repeated {
        out.push(node);
    }
}

/// Keeps the `children` whose immediate parent is one of `parents`.
pub fn filter_by_parent(store: &NodeStore, parents: &[NodeId], children: Vec<NodeId>) -> Vec<NodeId> {
    let parents: FnvHashSet<NodeId> = parents.iter().copied().collect();
    children
        .into_iter()
        .filter(|&child| {
            store
                .parent(child)
                .is_some_and(|parent| parents.contains(&parent))
        })
        .collect()
}
