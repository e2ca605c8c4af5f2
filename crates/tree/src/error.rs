use arbor_selector::SelectorError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error("Cannot search from {node}: only element nodes can be searched")]
    NotAnElement { node: String },

    #[error("Combinator '{combinator}' cannot drive a subtree search")]
    UnsupportedCombinator { combinator: char },
}
