//! Error types for the royalty checker.

use std::fmt;

/// Royalty checker error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error (missing credential, bad config source).
    Config(String),
    /// Indexer API communication error.
    Api(String),
    /// Response decoded fine but lacks the record we need.
    UnexpectedResponse(String),
    /// Failed to write report output.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Api(msg) => write!(f, "api error: {msg}"),
            Error::UnexpectedResponse(msg) => write!(f, "unexpected response: {msg}"),
            Error::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
