//! Error types for repivot

use crate::scene::ObjectId;
use thiserror::Error;

/// Main error type for repivot operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no object {0} in the scene")]
    NoSuchObject(ObjectId),

    #[error("object '{0}' has no mesh data")]
    NotAMesh(String),

    #[error("transform of '{0}' is not invertible")]
    DegenerateTransform(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for repivot operations
pub type Result<T> = std::result::Result<T, Error>;
