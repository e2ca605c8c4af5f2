//! arbor: query XML and JSON documents with CSS3-style selectors.
//!
//! ```no_run
//! use arbor::DocumentBuilder;
//!
//! # fn main() -> Result<(), arbor::ArborError> {
//! let source = DocumentBuilder::new().from_file("catalog.json")?;
//! let document = source.parse()?;
//! // Hold the root while working with results: nodes reach their parent and
//! // siblings through it. `Document::find` builds and drops a root per call.
//! let root = document.root();
//! for node in root.find("languages [name=Japanese] since")?.iter() {
//!     println!("{node}: {}", node.data());
//! }
//! let languages = root.find("languages")?;
//! let later = languages.find("* + *")?;
//! println!("{} item(s) follow another", later.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;

pub use arbor_selector::{SelectorError, SelectorList, parse_selector};
pub use arbor_tree::{NodeId, NodeProvider, NodeSet, QueryError, TreeNode};
pub use config::{DocumentBuilder, SourceFormat};
pub use document::{Document, DocumentNode, Node, Nodes, Source};
pub use error::ArborError;

use std::path::Path;

/// Loads a document from disk, detecting its format.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Source, ArborError> {
    DocumentBuilder::new().from_file(path)
}

/// Wraps in-memory XML or JSON text, detecting its format.
pub fn load_from_str(text: &str) -> Result<Source, ArborError> {
    DocumentBuilder::new().from_text(text)
}
