use std::sync::Arc;

use super::parse::WordPattern;
use crate::indexer::Generation;
use crate::storage::NodeId;
use crate::tree::{filter_by_parent, intersect};

/// Ranked matches for one query, tied to the generation they came from.
///
/// Holding the resolution keeps its generation alive, so every returned
/// `NodeId` stays valid even if a rebuild publishes in the meantime.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    generation: Option<Arc<Generation>>,
    nodes: Vec<NodeId>,
    truncated: bool,
}

impl Resolution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Whether some word hit the per-word retrieval cap.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn generation(&self) -> Option<&Arc<Generation>> {
        self.generation.as_ref()
    }

    pub fn full_path(&self, id: NodeId) -> Option<String> {
        self.generation.as_ref()?.full_path(id)
    }

    /// Full paths of all matches, in rank order.
    pub fn paths(&self) -> Vec<String> {
        let Some(generation) = self.generation.as_ref() else {
            return Vec::new();
        };
        self.nodes
            .iter()
            .filter_map(|&id| generation.full_path(id))
            .collect()
    }
}

/// Resolves parsed words against one generation.
pub fn resolve(
    generation: &Arc<Generation>,
    words: &[WordPattern],
    max_per_word: usize,
) -> Resolution {
    if words.is_empty() {
        return Resolution::empty();
    }

    let mut truncated = false;
    let mut lists = Vec::with_capacity(words.len());
    for word in words {
        let (candidates, hit_cap) = resolve_word(generation, word, max_per_word);
        truncated |= hit_cap;
        lists.push(candidates);
    }

    let nodes = intersect(generation.nodes(), lists);
    Resolution {
        generation: Some(generation.clone()),
        nodes,
        truncated,
    }
}

fn resolve_word(
    generation: &Generation,
    word: &WordPattern,
    max_per_word: usize,
) -> (Vec<NodeId>, bool) {
    let mut hit_cap = false;
    let mut retrieve = |fragment: &str| {
        let found = generation.retrieve(fragment, word.prefix_mode, max_per_word);
        hit_cap |= found.len() >= max_per_word;
        found
    };

    let mut fragments = word.fragments.iter();
    let Some(first) = fragments.next() else {
        return (Vec::new(), false);
    };
    let mut candidates = retrieve(first);
    for fragment in fragments {
        let children = retrieve(fragment);
        candidates = filter_by_parent(generation.nodes(), &candidates, children);
    }
    (candidates, hit_cap)
}
