//! A [`NodeProvider`] over a `serde_json::Value`.
//!
//! Every JSON value is an element: object members are named by their key and array
//! items by their index, so `0 name` or `[id=2] name` read naturally. Values with no
//! entries (scalars, `[]`, `{}`) are also data nodes. Every member of a container
//! doubles as its attributes; nested containers are rendered as compact JSON.

use std::borrow::Cow;

use arbor_tree::NodeProvider;
use serde_json::Value;

/// Owns a parsed JSON value and hands out providers into it.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    value: Value,
}

impl JsonDocument {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        log::debug!("parsed JSON document ({})", kind(&value));
        Ok(Self { value })
    }

    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The top-level value. It has no key and therefore no name.
    pub fn root_node(&self) -> JsonNode<'_> {
        JsonNode {
            value: &self.value,
            key: JsonKey::Root,
        }
    }
}

/// How a value is reached from its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKey<'a> {
    Root,
    Key(&'a str),
    Index(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct JsonNode<'a> {
    value: &'a Value,
    key: JsonKey<'a>,
}

impl<'a> JsonNode<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            value,
            key: JsonKey::Root,
        }
    }

    pub fn key(&self) -> JsonKey<'a> {
        self.key
    }

    pub fn inner(&self) -> &'a Value {
        self.value
    }

    fn entries(&self) -> Box<dyn Iterator<Item = JsonNode<'a>> + 'a> {
        match self.value {
            Value::Array(items) => Box::new(items.iter().enumerate().map(|(i, value)| JsonNode {
                value,
                key: JsonKey::Index(i),
            })),
            Value::Object(members) => Box::new(members.iter().map(|(k, value)| JsonNode {
                value,
                key: JsonKey::Key(k.as_str()),
            })),
            _ => Box::new(std::iter::empty()),
        }
    }
}

/// Text of a scalar; `None` for containers.
fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null => Some(Cow::Borrowed("null")),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl NodeProvider for JsonNode<'_> {
    fn name(&self) -> Option<Cow<'_, str>> {
        match self.key {
            JsonKey::Root => None,
            JsonKey::Key(k) => Some(Cow::Borrowed(k)),
            JsonKey::Index(i) => Some(Cow::Owned(i.to_string())),
        }
    }

    fn attributes(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)> {
        self.entries()
            .filter_map(|entry| {
                let name = entry.name()?.into_owned();
                let value = scalar_text(entry.value)
                    .unwrap_or_else(|| Cow::Owned(entry.value.to_string()));
                Some((Cow::Owned(name), value))
            })
            .collect()
    }

    fn value(&self) -> Option<Cow<'_, str>> {
        match self.value {
            Value::Null => None,
            other => scalar_text(other),
        }
    }

    fn is_element(&self) -> bool {
        true
    }

    fn is_data(&self) -> bool {
        match self.value {
            Value::Array(items) => items.is_empty(),
            Value::Object(members) => members.is_empty(),
            _ => true,
        }
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        self.entries()
    }
}
