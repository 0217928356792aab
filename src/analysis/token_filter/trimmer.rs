//! Trimmer filter implementation.

use std::sync::LazyLock;

use regex::Regex;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Leading and trailing runs of non-word characters (word = `[A-Za-z0-9_]`).
static LEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9A-Za-z_]+").expect("valid leading trim pattern"));
static TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_]+$").expect("valid trailing trim pattern"));

/// A filter that strips non-word characters from both ends of each token.
///
/// Only ASCII letters, digits and `_` count as word characters, so `"(café)"`
/// becomes `"caf"`. A token made only of punctuation becomes empty and is
/// left for the stop word filter to drop.
#[derive(Clone, Debug, Default)]
pub struct TrimmerFilter;

impl TrimmerFilter {
    /// Create a new trimmer filter.
    pub fn new() -> Self {
        TrimmerFilter
    }

    /// Trim a single word.
    pub fn trim(&self, word: &str) -> String {
        let start = LEADING.find(word).map_or(0, |m| m.end());
        let rest = &word[start..];
        let end = TRAILING.find(rest).map_or(rest.len(), |m| m.start());
        rest[..end].to_string()
    }
}

impl Filter for TrimmerFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let trimmed = self.trim(&token.text);
                    token.with_text(trimmed)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "trimmer"
    }
}
