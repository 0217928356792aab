//! Token filter implementations for token transformation.
//!
//! Filters run in sequence after the tokenizer. The default chain is the one
//! elasticlunr registers:
//!
//! ```text
//! Tokenizer → trimmer → stopWordFilter → stemmer → Index
//! ```
//!
//! A filter's [`Filter::name`] is the label written into the serialized
//! pipeline, so it must stay stable once indexes exist in the wild.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so a pipeline can be shared freely.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use lunrdex::analysis::token::{Token, TokenStream};
/// use lunrdex::analysis::token_filter::Filter;
/// use lunrdex::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter, as recorded in serialized pipelines.
    fn name(&self) -> &'static str;
}

pub mod stem;
pub mod stop;
pub mod trimmer;

pub use stem::{PorterStemmer, StemFilter, Stemmer};
pub use stop::StopFilter;
pub use trimmer::TrimmerFilter;
