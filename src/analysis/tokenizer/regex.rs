//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{LunrdexError, Result};

/// Separator used by elasticlunr: runs of whitespace and hyphens.
///
/// Whitespace is the JavaScript `\s` class, which differs from Unicode
/// White_Space: U+FEFF is included and U+0085 is not.
pub const DEFAULT_SEPARATOR: &str =
    r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}\-]+";

/// Whether `c` is whitespace for JavaScript's `\s` and `String.prototype.trim`.
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t'
            | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// A tokenizer that splits text on a separator pattern.
///
/// The input is trimmed and lowercased before splitting, and empty pieces are
/// dropped, so `"  Hello--World "` yields `hello` and `world`.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The pattern matching the gaps between tokens
    separator: Arc<Regex>,
    /// Whether to lowercase the text before splitting
    lowercase: bool,
}

impl RegexTokenizer {
    /// Create a new tokenizer with the elasticlunr separator.
    pub fn new() -> Result<Self> {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Create a new tokenizer splitting on a custom separator pattern.
    pub fn with_separator(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| LunrdexError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            separator: Arc::new(regex),
            lowercase: true,
        })
    }

    /// Keep the original casing of the input.
    pub fn preserve_case(mut self) -> Self {
        self.lowercase = false;
        self
    }

    /// Get the separator pattern used by this tokenizer.
    pub fn separator(&self) -> &str {
        self.separator.as_str()
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new().expect("Default separator pattern should be valid")
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let trimmed = text.trim_matches(is_js_whitespace);
        let text = if self.lowercase {
            trimmed.to_lowercase()
        } else {
            trimmed.to_owned()
        };

        let tokens: Vec<Token> = self
            .separator
            .split(&text)
            .filter(|piece| !piece.is_empty())
            .enumerate()
            .map(|(position, piece)| Token::new(piece, position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
