use std::fmt;

use thiserror::Error;

/// Failure to obtain an interpretable response.
///
/// The payload is the rendered error chain of the underlying client error,
/// so the diagnostic survives being cloned across shared load results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("invalid client configuration: {0}")]
    Configuration(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Coarse classification of a [`TransportError`], used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Decode,
    Cancelled,
    Configuration,
    Request,
}

impl TransportError {
    pub fn kind(&self) -> TransportErrorKind {
        match self {
            TransportError::Timeout(_) => TransportErrorKind::Timeout,
            TransportError::Connect(_) => TransportErrorKind::Connect,
            TransportError::Decode(_) => TransportErrorKind::Decode,
            TransportError::Cancelled => TransportErrorKind::Cancelled,
            TransportError::Configuration(_) => {
                TransportErrorKind::Configuration
            }
            TransportError::Request(_) => TransportErrorKind::Request,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TransportError::Cancelled)
    }
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Decode => "decode",
            TransportErrorKind::Cancelled => "cancelled",
            TransportErrorKind::Configuration => "configuration",
            TransportErrorKind::Request => "request",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
