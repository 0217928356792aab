//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
pub mod pipeline;

pub use analyzer::Analyzer;
pub use pipeline::{DEFAULT_FILTERS, PipelineAnalyzer, registered_filter};
