// src/error.rs
use arbor_selector::SelectorError;
use arbor_tree::QueryError;
use thiserror::Error;

/// Everything that can go wrong between reading a document and returning matches.
#[derive(Error, Debug)]
pub enum ArborError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot tell whether {origin} is XML or JSON; pass the format explicitly")]
    UnknownFormat { origin: String },

    #[error("Query failed: {0}")]
    Query(#[from] QueryError),
}

impl From<SelectorError> for ArborError {
    fn from(e: SelectorError) -> Self {
        ArborError::Query(QueryError::Selector(e))
    }
}
