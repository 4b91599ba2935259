//! Result types handed to the host UI.

use serde::{Deserialize, Serialize};

/// Marker rendered after the suggestion rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Some word hit the per-word cap; the list may be missing matches.
    Limited,
    /// More matches exist than were rendered.
    More,
}

impl Overflow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Limited => "... limited ...",
            Self::More => "... more ...",
        }
    }
}

/// The first rows of a resolution, ready to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub paths: Vec<String>,
    pub overflow: Option<Overflow>,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Rows as the list control shows them, overflow marker last.
    pub fn rows(&self) -> Vec<&str> {
        let mut rows: Vec<&str> = self.paths.iter().map(String::as_str).collect();
        if let Some(overflow) = self.overflow {
            rows.push(overflow.as_str());
        }
        rows
    }
}

/// Index status information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatus {
    /// State of the most recently started build.
    pub state: String,
    /// Epoch of the most recently started build.
    pub epoch: u64,
    /// Epoch of the live generation, if one is published.
    pub published_epoch: Option<u64>,
    /// Root of the most recently started build.
    pub root: Option<String>,
    /// Nodes in the live generation.
    pub nodes: usize,
    /// Bag entries in the live generation.
    pub entries: usize,
    pub scanned_dirs: usize,
    pub skipped: usize,
    pub errors: usize,
    pub started_at: Option<u64>,
    pub finished_at: Option<u64>,
    /// Last error message if state is "failed".
    pub last_error: Option<String>,
}
