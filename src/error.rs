// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for jarclient
//!
//! `HttpClient::do_request` surfaces exactly one failure kind at the top level,
//! [`Error::Request`], which keeps the underlying cause as its source so the
//! chain can be walked with [`std::error::Error::source`] or [`Error::root`].

use thiserror::Error;

/// Result type alias for jarclient operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause used for transport-level failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for jarclient
#[derive(Error, Debug)]
pub enum Error {
    /// Umbrella error returned by the request entry point
    #[error("Request error for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<Error>,
    },

    /// JSON was requested but the body is not valid JSON
    #[error("Response body is not valid JSON (status {status}): {source}")]
    ResponseFormat {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The transport failed without a server response
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// Timeout error
    #[error("Operation timed out after {duration_ms}ms: {operation} {url}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: String,
    },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Header name or value could not be encoded
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap a failure into the umbrella request error
    ///
    /// An error that is already a `Request` is returned unchanged.
    pub fn request(url: impl Into<String>, cause: Error) -> Self {
        match cause {
            err @ Error::Request { .. } => err,
            cause => Error::Request {
                url: url.into(),
                source: Box::new(cause),
            },
        }
    }

    /// Create a transport error from any cause
    pub fn transport<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Transport(cause.into())
    }

    /// Create a timeout error for the call to `url`
    pub fn timeout(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: url.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// The cause under the `Request` umbrella, or `self` otherwise
    pub fn root(&self) -> &Error {
        match self {
            Error::Request { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self.root(), Error::Timeout { .. })
    }

    /// Check if the transport failed without a response
    pub fn is_transport(&self) -> bool {
        matches!(self.root(), Error::Transport(_))
    }

    /// Check if a JSON body could not be parsed
    pub fn is_response_format(&self) -> bool {
        matches!(self.root(), Error::ResponseFormat { .. })
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self.root() {
            Error::ResponseFormat { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Request { url, .. } => Some(url),
            Error::Timeout { url, .. } => Some(url),
            _ => None,
        }
    }
}
