//! Typed-text resolution.
//!
//! Text is split into whitespace-delimited words. Each word may carry a
//! leading exact marker, a trailing separator (ignored) and internal
//! separators (`parent\child` patterns). Words are resolved independently
//! against the bag and then intersected along the tree order.

mod parse;
mod resolve;

pub use parse::{parse_words, WordPattern};
pub use resolve::{resolve, Resolution};
