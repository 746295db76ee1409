//! Content transformers

mod markup;

use minifier::{css, js, json};

use crate::domain::ports::{ContentTransformer, TransformError};
use crate::domain::value_objects::MediaType;

/// Minifies css, javascript, json and markup
#[derive(Debug, Clone, Copy, Default)]
pub struct Minifier;

impl ContentTransformer for Minifier {
    fn transform(&self, media_type: MediaType, raw: &[u8]) -> Result<Vec<u8>, TransformError> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| TransformError::new(media_type, format!("not valid UTF-8: {e}")))?;

        let minified = match media_type {
            MediaType::Css => css::minify(text)
                .map_err(|e| TransformError::new(media_type, e))?
                .to_string(),
            MediaType::JavaScript => js::minify(text).to_string(),
            MediaType::Json => json::minify(text).to_string(),
            MediaType::Html | MediaType::Svg | MediaType::Xml => {
                markup::minify(text).map_err(|e| TransformError::new(media_type, e))?
            }
        };
        Ok(minified.into_bytes())
    }
}
