//! Document module.

#[allow(clippy::module_inception)]
pub mod document;

pub use document::{
    BODY_FIELD, Document, DocumentBuilder, ID_FIELD, KEYWORDS_FIELD, TITLE_FIELD,
};
