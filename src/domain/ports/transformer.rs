//! ContentTransformer port - rewrites source bytes before comparison/upload
//!
//! The engine only calls this when minification is enabled and the file has a
//! known media type. The transformed bytes are what gets compared with the
//! destination and what gets uploaded; the source file is never touched.

use thiserror::Error;

use crate::domain::value_objects::MediaType;

/// Transformation failure. Fatal to the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot transform {media_type} content: {message}")]
pub struct TransformError {
    pub media_type: MediaType,
    pub message: String,
}

impl TransformError {
    pub fn new(media_type: MediaType, message: impl Into<String>) -> Self {
        Self {
            media_type,
            message: message.into(),
        }
    }
}

pub trait ContentTransformer {
    fn transform(&self, media_type: MediaType, raw: &[u8]) -> Result<Vec<u8>, TransformError>;
}

impl<T: ContentTransformer + ?Sized> ContentTransformer for &T {
    fn transform(&self, media_type: MediaType, raw: &[u8]) -> Result<Vec<u8>, TransformError> {
        (**self).transform(media_type, raw)
    }
}

/// Transformer that returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl ContentTransformer for Identity {
    fn transform(&self, _media_type: MediaType, raw: &[u8]) -> Result<Vec<u8>, TransformError> {
        Ok(raw.to_vec())
    }
}
