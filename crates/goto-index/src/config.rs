//! Tunables for scanning and query resolution.
//!
//! `GotoConfig` is plain data so a host can embed it in its own settings
//! document; every field falls back to its default when omitted.

use serde::{Deserialize, Serialize};

use crate::error::{GotoError, Result};

/// Per-word retrieval cap; hitting it marks a resolution as truncated.
pub const DEFAULT_MAX_PER_WORD: usize = 1000;
/// Number of suggestion rows rendered before the overflow marker.
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;
/// Longest assembled path (in characters) the scanner will descend into.
pub const DEFAULT_MAX_PATH_LEN: usize = 1024;
/// Leading character that switches a word to exact-key matching.
pub const DEFAULT_EXACT_MARKER: char = '\'';
pub const DEFAULT_WORKER_NAME: &str = "goto-index-scan";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GotoConfig {
    pub max_per_word: usize,
    pub display_limit: usize,
    pub max_path_len: usize,
    pub exact_marker: char,
    /// Separator used to assemble full paths during the scan and in
    /// `full_path`. Typed queries accept both `\` and `/` regardless.
    pub separator: char,
    pub worker_name: String,
}

impl Default for GotoConfig {
    fn default() -> Self {
        Self {
            max_per_word: DEFAULT_MAX_PER_WORD,
            display_limit: DEFAULT_DISPLAY_LIMIT,
            max_path_len: DEFAULT_MAX_PATH_LEN,
            exact_marker: DEFAULT_EXACT_MARKER,
            separator: std::path::MAIN_SEPARATOR,
            worker_name: DEFAULT_WORKER_NAME.to_string(),
        }
    }
}

impl GotoConfig {
    pub fn with_max_per_word(mut self, max_per_word: usize) -> Self {
        self.max_per_word = max_per_word;
        self
    }

    pub fn with_display_limit(mut self, display_limit: usize) -> Self {
        self.display_limit = display_limit;
        self
    }

    pub fn with_max_path_len(mut self, max_path_len: usize) -> Self {
        self.max_path_len = max_path_len;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_exact_marker(mut self, exact_marker: char) -> Self {
        self.exact_marker = exact_marker;
        self
    }

    /// Rejects settings that would make every query empty or ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.max_per_word == 0 {
            return Err(GotoError::InvalidConfig(
                "maxPerWord must be at least 1".to_string(),
            ));
        }
        if self.display_limit == 0 {
            return Err(GotoError::InvalidConfig(
                "displayLimit must be at least 1".to_string(),
            ));
        }
        if self.max_path_len == 0 {
            return Err(GotoError::InvalidConfig(
                "maxPathLen must be at least 1".to_string(),
            ));
        }
        if self.exact_marker == self.separator || is_query_separator(self.exact_marker) {
            return Err(GotoError::InvalidConfig(format!(
                "exactMarker {:?} collides with a path separator",
                self.exact_marker
            )));
        }
        if self.exact_marker.is_whitespace() {
            return Err(GotoError::InvalidConfig(
                "exactMarker must not be whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

/// Separators recognised in typed query text.
pub(crate) fn is_query_separator(ch: char) -> bool {
    ch == '\\' || ch == '/'
}
