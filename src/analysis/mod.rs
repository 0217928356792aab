//! Text analysis for lunrdex.
//!
//! Turns field text into index terms the way elasticlunr does: split on
//! whitespace and hyphens, lowercase, trim punctuation, drop stop words and
//! stem with the Porter algorithm.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
