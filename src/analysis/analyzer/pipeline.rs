//! Pipeline analyzer that combines a tokenizer with named token filters.
//!
//! The filters of a pipeline are identified by name so the pipeline can be
//! written into a serialized index as a plain list (for example
//! `["trimmer", "stopWordFilter", "stemmer"]`) and rebuilt when the index is
//! loaded again. Only filters known to [`registered_filter`] can be rebuilt.
//!
//! # Examples
//!
//! ```
//! use lunrdex::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//!
//! let analyzer = PipelineAnalyzer::elasticlunr().unwrap();
//! let terms = analyzer.terms("The Quick-Running foxes!").unwrap();
//!
//! assert_eq!(terms, vec!["quick", "run", "fox"]);
//! assert_eq!(
//!     analyzer.filter_names(),
//!     vec!["trimmer", "stopWordFilter", "stemmer"]
//! );
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::{Filter, StemFilter, StopFilter, TrimmerFilter};
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::{LunrdexError, Result};

/// Names of the filters elasticlunr runs by default, in order.
pub const DEFAULT_FILTERS: [&str; 3] = ["trimmer", "stopWordFilter", "stemmer"];

/// Look up a filter by the name it is serialized under.
pub fn registered_filter(name: &str) -> Option<Arc<dyn Filter>> {
    let filter: Arc<dyn Filter> = match name {
        "trimmer" => Arc::new(TrimmerFilter::new()),
        "stopWordFilter" => Arc::new(StopFilter::new()),
        "stemmer" => Arc::new(StemFilter::new()),
        _ => return None,
    };
    Some(filter)
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer and no filters.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// The default elasticlunr pipeline: trimmer, stop word filter, stemmer.
    pub fn elasticlunr() -> Result<Self> {
        let names: Vec<String> = DEFAULT_FILTERS.iter().map(|s| s.to_string()).collect();
        Self::from_filter_names(&names)
    }

    /// Rebuild a pipeline from serialized filter names.
    ///
    /// Fails when a name does not belong to a registered filter.
    pub fn from_filter_names(names: &[String]) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        names.iter().try_fold(Self::new(tokenizer), |pipeline, name| {
            registered_filter(name)
                .map(|filter| pipeline.add_filter(filter))
                .ok_or_else(|| {
                    LunrdexError::analysis(format!(
                        "Cannot load unregistered pipeline function: {name}"
                    ))
                })
        })
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Names of the filters in order, as written into a serialized index.
    pub fn filter_names(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.name().to_string()).collect()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        let kept: Vec<Token> = tokens.filter(|token| !token.is_stopped()).collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &self.filter_names())
            .finish()
    }
}
