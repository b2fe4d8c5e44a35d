use thiserror::Error;

use crate::path::Index;

/// Everything that can go wrong while parsing a path or editing a document.
///
/// Every variant is detected before the document is written to, so an `Err`
/// always means the document was left as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("key does not exist: {0}")]
    KeyNotFound(String),

    #[error("key already exists: {0}")]
    KeyAlreadyExists(String),

    #[error("value of key `{0}` is not an array")]
    NotASequence(String),

    #[error("value of key `{0}` is not an object and cannot be traversed")]
    NotATraversableElement(String),

    #[error("index {index} of key `{key}` is out of bounds (length {len})")]
    IndexOutOfBounds { key: String, index: Index, len: usize },

    #[error("cannot insert a new key at an array index: {0}")]
    CannotIndexOnInsert(String),

    #[error("cannot set key `{0}` to a null value")]
    NilValueRejected(String),
}

pub type Result<T> = std::result::Result<T, Error>;
