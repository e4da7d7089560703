//! Error type shared by schema construction and extraction.

use thiserror::Error;

/// Errors raised while building a schema or extracting records.
#[derive(Error, Debug)]
pub enum RipError {
    /// The schema or one of its fields is invalid.
    #[error("schema error: {0}")]
    Schema(String),

    /// The input does not fit the schema.
    #[error("data error: {0}")]
    Data(String),

    /// Unsupported file kind or an unparseable field specification.
    #[error("config error: {0}")]
    Config(String),

    /// The XML document is not well formed.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Rows could not be written as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RipError {
    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        RipError::Schema(msg.into())
    }

    pub(crate) fn data(msg: impl Into<String>) -> Self {
        RipError::Data(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RipError>;
