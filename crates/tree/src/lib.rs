//! Tree nodes over a [`NodeProvider`], materialized on first touch, and the engine
//! that evaluates selectors against them.

pub mod engine;
pub mod error;
pub mod ids;
pub mod matching;
pub mod node;
pub mod node_set;
pub mod provider;

pub use arbor_selector::{SelectorError, SelectorList, parse_selector};
pub use error::QueryError;
pub use ids::NodeId;
pub use node::TreeNode;
pub use node_set::NodeSet;
pub use provider::NodeProvider;
