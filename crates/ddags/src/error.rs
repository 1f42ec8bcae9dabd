//! Error types for ddags operations.
//!
//! This module provides the main error type [`DdagsError`] which wraps the
//! error conditions that can occur while loading and resolving schemas.

use std::io;

use thiserror::Error;

use ddags_schema::SchemaError;

/// The main error type for ddags operations.
///
/// The `Schema` variant carries a typed [`SchemaError`] with a stable error
/// code, which can be used for rich error reporting.
#[derive(Debug, Error)]
pub enum DdagsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DdagsError {
    /// Returns the wrapped schema error, if this is one.
    pub fn as_schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(err) => Some(err),
            _ => None,
        }
    }
}
