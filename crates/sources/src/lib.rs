//! Node providers for the document formats arbor can query.

pub mod json;
pub mod xml;

pub use json::{JsonDocument, JsonKey, JsonNode};
pub use xml::{XmlDocument, XmlNode};
