// src/config.rs
use std::fs;
use std::io;
use std::path::Path;

use crate::document::Source;
use crate::error::ArborError;

/// The document format to parse a source as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceFormat {
    /// Guess from the file extension, then from the first non-blank character. (Default)
    #[default]
    Auto,
    Xml,
    Json,
}

impl SourceFormat {
    /// Maps a file extension to a format. Unknown extensions give `None`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xml" | "xhtml" | "svg" | "xsl" | "xslt" | "rss" | "atom" => Some(SourceFormat::Xml),
            "json" | "geojson" => Some(SourceFormat::Json),
            _ => None,
        }
    }

    /// Sniffs the first non-whitespace character: `<` is XML, `{` or `[` is JSON.
    pub fn sniff(text: &str) -> Option<Self> {
        match text.trim_start().chars().next() {
            Some('<') => Some(SourceFormat::Xml),
            Some('{') | Some('[') => Some(SourceFormat::Json),
            _ => None,
        }
    }

    /// Resolves `Auto` to a concrete format. `origin` names the source in errors.
    pub fn resolve(self, path: Option<&Path>, text: &str, origin: &str) -> Result<Self, ArborError> {
        if self != SourceFormat::Auto {
            return Ok(self);
        }
        let by_extension = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(SourceFormat::from_extension);
        by_extension
            .or_else(|| SourceFormat::sniff(text))
            .ok_or_else(|| ArborError::UnknownFormat {
                origin: origin.to_string(),
            })
    }
}

/// A builder for loading a [`Source`].
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    format: SourceFormat,
    skip_whitespace: bool,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            format: SourceFormat::Auto,
            skip_whitespace: true,
        }
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Forces a format instead of detecting one.
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }

    /// Keeps whitespace-only XML text as data nodes. Off by default; JSON ignores it.
    pub fn with_whitespace(mut self, keep: bool) -> Self {
        self.skip_whitespace = !keep;
        self
    }

    /// Reads a document from disk.
    pub fn from_file<P: AsRef<Path>>(&self, path: P) -> Result<Source, ArborError> {
        let path_ref = path.as_ref();
        let text = fs::read_to_string(path_ref).map_err(|e| {
            ArborError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read document from '{}': {}", path_ref.display(), e),
            ))
        })?;
        let origin = path_ref.display().to_string();
        let format = self.format.resolve(Some(path_ref), &text, &origin)?;
        log::debug!("loaded {} as {:?}", origin, format);
        Ok(Source::new(text, format, self.skip_whitespace))
    }

    /// Wraps in-memory text.
    pub fn from_text(&self, text: impl Into<String>) -> Result<Source, ArborError> {
        let text = text.into();
        let format = self.format.resolve(None, &text, "<text>")?;
        Ok(Source::new(text, format, self.skip_whitespace))
    }
}
