use crate::config::is_query_separator;

/// One whitespace-delimited word of the typed text.
///
/// `fragments` holds the separator-delimited pieces of the word in path
/// order; a plain word has exactly one. Each fragment after the first must
/// name a direct child of a match for the fragment before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPattern {
    pub fragments: Vec<String>,
    pub prefix_mode: bool,
}

impl WordPattern {
    pub fn is_compound(&self) -> bool {
        self.fragments.len() > 1
    }
}

/// Splits `text` into word patterns.
///
/// Words that reduce to nothing (a lone separator or a bare marker) are
/// dropped rather than matching everything.
pub fn parse_words(text: &str, exact_marker: char) -> Vec<WordPattern> {
    text.split_whitespace()
        .filter_map(|word| parse_word(word, exact_marker))
        .collect()
}

fn parse_word(word: &str, exact_marker: char) -> Option<WordPattern> {
    let mut word = word;
    if let Some(last) = word.chars().next_back() {
        if is_query_separator(last) {
            word = &word[..word.len() - last.len_utf8()];
        }
    }

    let mut prefix_mode = true;
    if let Some(rest) = word.strip_prefix(exact_marker) {
        prefix_mode = false;
        word = rest;
    }

    let fragments: Vec<String> = word
        .split(is_query_separator)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect();
    if fragments.is_empty() {
        return None;
    }
    Some(WordPattern {
        fragments,
        prefix_mode,
    })
}
