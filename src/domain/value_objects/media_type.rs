//! Media type lookup for content transformation
//!
//! Maps a lowercase file extension to the media type the transformer is keyed
//! by. Extensions outside the table have no media type and bypass
//! transformation entirely.

use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Css,
    Html,
    JavaScript,
    Json,
    Svg,
    Xml,
}

impl MediaType {
    /// Look up by extension, without the leading dot (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "css" => Some(MediaType::Css),
            "htm" | "html" => Some(MediaType::Html),
            "js" => Some(MediaType::JavaScript),
            "json" => Some(MediaType::Json),
            "svg" => Some(MediaType::Svg),
            "xml" => Some(MediaType::Xml),
            _ => None,
        }
    }

    /// Look up by the extension of a path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Css => "text/css",
            MediaType::Html => "text/html",
            MediaType::JavaScript => "text/javascript",
            MediaType::Json => "application/json",
            MediaType::Svg => "image/svg+xml",
            MediaType::Xml => "text/xml",
        }
    }

    /// Whether the content is tag-structured markup
    pub fn is_markup(self) -> bool {
        matches!(self, MediaType::Html | MediaType::Svg | MediaType::Xml)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
