//! Error types for the todo store.
//!
//! # Design
//! State only ever sees one kind of failure: "the remote operation failed",
//! carried as a human-readable message (see [`ApiError::message`]). The
//! variants below exist so logs and tests can tell a bad status from a broken
//! body or a dead connection; workflows collapse all of them into the same
//! `set-error` + `error`-status path.

/// Errors produced while talking to the remote collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is the
    /// server-supplied `error` string when the body carried one.
    #[error("remote operation failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// The message stored in state by a failed workflow.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors raised while building a [`Config`](crate::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported url scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
}
