//! Error types for the harvester.

use thiserror::Error;

/// A response did not have the shape the decoder expects.
///
/// Decode failures are fatal for the walk that produced them: the platform
/// changed its response format and continuing would silently drop data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A tag field held a value other than the expected literal.
    #[error("unexpected {field}: expected {expected}, found {found}")]
    UnexpectedTag {
        field: &'static str,
        expected: String,
        found: String,
    },

    /// A result object carried a `__typename` this decoder does not know.
    #[error("unknown {context} __typename {typename}")]
    UnknownTypename {
        context: &'static str,
        typename: String,
    },

    /// A timeline entry id matched none of the known prefixes.
    #[error("unknown entryId {entry_id}")]
    UnknownEntry { entry_id: String },

    /// A required field was absent or null.
    #[error("missing field {field}")]
    MissingField { field: String },

    /// A field was present but had the wrong type or contents.
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Two fields that must agree did not.
    #[error("{field} mismatch: expected {expected}, found {found}")]
    IdMismatch {
        field: &'static str,
        expected: String,
        found: String,
    },

    /// An id string did not parse as an integer.
    #[error("invalid id string {value:?}")]
    InvalidId { value: String },

    /// A tweet without a resolvable author.
    #[error("tweet {tweet_id} has no author")]
    MissingAuthor { tweet_id: String },
}

/// Errors that can occur while harvesting.
#[derive(Debug, Error)]
pub enum Error {
    /// Response shape not understood
    #[error("decode failure: {0}")]
    Decode(#[from] DecodeError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The API answered with a non-success status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session cookies could not be loaded
    #[error("Session error: {0}")]
    Session(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A looked-up object does not exist or is unavailable
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
