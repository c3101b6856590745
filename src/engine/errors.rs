use thiserror::Error;
use tracing::{debug, error};

use crate::engine::core::dictionary::provider::DictionaryError;
use crate::engine::core::key::codec::KeyCodecError;

/// Errors that can abort query compilation. Any one of these is fatal to the
/// whole query; there is no partial result.
#[derive(Debug, Error)]
pub enum QueryCompileError {
    #[error("Column `{0}` could not be resolved against the bound table")]
    SchemaResolution(String),

    #[error("Key encoding failed: {0}")]
    KeyEncoding(#[from] KeyCodecError),

    #[error("Dictionary lookup failed: {0}")]
    DictionaryLookup(#[from] DictionaryError),

    #[error("Dictionary cache returned {returned} handles for {requested} columns")]
    DictionaryResolution { requested: usize, returned: usize },
}

impl QueryCompileError {
    pub fn log_error(&self) {
        match self {
            QueryCompileError::SchemaResolution(name) => {
                error!("Column resolution failed: {}", name);
                debug!("Unresolved column details: {}", name);
            }
            QueryCompileError::KeyEncoding(e) => {
                error!("Key encoding failed: {}", e);
                debug!("Key encoding error details: {:?}", e);
            }
            QueryCompileError::DictionaryLookup(e) => {
                error!("Dictionary lookup failed: {}", e);
                debug!("Dictionary lookup error details: {:?}", e);
            }
            QueryCompileError::DictionaryResolution {
                requested,
                returned,
            } => {
                error!(
                    "Dictionary cache returned {} handles for {} columns",
                    returned, requested
                );
                debug!("Short dictionary batch: requested={requested}, returned={returned}");
            }
        }
    }
}
