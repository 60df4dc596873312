//! Error types for the lookup cache
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the lookup cache.
///
/// Remote lookup failures are not represented here; they surface as
/// [`crate::cache::Lookup::Failed`].
#[derive(Error, Debug)]
pub enum CacheError {
    /// Stored bytes (or one of their map keys) could not be decoded
    #[error("Failed to decode '{key}': {reason}")]
    Decode { key: String, reason: String },

    /// A value could not be serialized for storage
    #[error("Failed to encode value: {0}")]
    Encode(String),

    /// A mapping file could not be read
    #[error("Failed to read mapping file {}: {source}", path.display())]
    MappingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The name does not refer to a logical cache
    #[error("Unknown logical cache: {0}")]
    UnknownCache(String),

    /// The logical cache holds no data
    #[error("Logical cache is empty: {0}")]
    NotFound(String),
}

impl CacheError {
    /// Builds a decode error for the given store key.
    pub fn decode(key: impl Into<String>, reason: impl ToString) -> Self {
        CacheError::Decode {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::UnknownCache(_) | CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Decode { .. } | CacheError::Encode(_) | CacheError::MappingFile { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the lookup cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message() {
        let err = CacheError::decode("TenantIds", "bad key");
        assert_eq!(err.to_string(), "Failed to decode 'TenantIds': bad key");
    }

    #[test]
    fn test_status_codes() {
        let unknown = CacheError::UnknownCache("Nope".to_string()).into_response();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let decode = CacheError::decode("k", "r").into_response();
        assert_eq!(decode.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
