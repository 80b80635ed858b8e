//! Closed outcome type for every remote call.
//!
//! Repositories convert raw endpoint outcomes into [`NetworkResult`] through
//! [`classify`] and nothing above the repository layer ever sees a transport
//! error as a thrown value.

mod classify;
mod telemetry;

pub use classify::{Expect, classify, classify_no_content, reason_phrase};
pub use telemetry::{NETWORK_TARGET, log_outcome};

use thiserror::Error;
use vitrine_contracts::prelude::TransportError;

/// Outcome of a single remote call.
///
/// Exactly one variant holds. `Rejected` means the server answered with
/// something other than the expected success code; `TransportFailure` means
/// no interpretable response was obtained at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkResult<T> {
    Success(T),
    Rejected {
        message: Option<String>,
        code: Option<u16>,
    },
    TransportFailure(TransportError),
}

/// The non-success half of a [`NetworkResult`], detached from its payload
/// type so it can be stored in paging state and shared between waiters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkFailure {
    #[error("server rejected the request{}", rejection_detail(.code, .message))]
    Rejected {
        message: Option<String>,
        code: Option<u16>,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

fn rejection_detail(code: &Option<u16>, message: &Option<String>) -> String {
    match (code, message.as_deref()) {
        (Some(code), Some(message)) => format!(" ({code}): {message}"),
        (Some(code), None) => format!(" ({code})"),
        (None, Some(message)) => format!(": {message}"),
        (None, None) => String::new(),
    }
}

impl<T> NetworkResult<T> {
    pub fn rejected(code: Option<u16>, message: impl Into<String>) -> Self {
        NetworkResult::Rejected {
            message: Some(message.into()),
            code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NetworkResult::Success(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, NetworkResult::Rejected { .. })
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, NetworkResult::TransportFailure(_))
    }

    /// Status code of a rejection. Success and transport failures carry none.
    pub fn code(&self) -> Option<u16> {
        match self {
            NetworkResult::Rejected { code, .. } => *code,
            _ => None,
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            NetworkResult::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> NetworkResult<&T> {
        match self {
            NetworkResult::Success(value) => NetworkResult::Success(value),
            NetworkResult::Rejected { message, code } => {
                NetworkResult::Rejected {
                    message: message.clone(),
                    code: *code,
                }
            }
            NetworkResult::TransportFailure(cause) => {
                NetworkResult::TransportFailure(cause.clone())
            }
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> NetworkResult<U> {
        match self {
            NetworkResult::Success(value) => NetworkResult::Success(f(value)),
            NetworkResult::Rejected { message, code } => {
                NetworkResult::Rejected { message, code }
            }
            NetworkResult::TransportFailure(cause) => {
                NetworkResult::TransportFailure(cause)
            }
        }
    }

    pub fn into_result(self) -> Result<T, NetworkFailure> {
        match self {
            NetworkResult::Success(value) => Ok(value),
            NetworkResult::Rejected { message, code } => {
                Err(NetworkFailure::Rejected { message, code })
            }
            NetworkResult::TransportFailure(cause) => {
                Err(NetworkFailure::Transport(cause))
            }
        }
    }
}

impl<T> From<NetworkFailure> for NetworkResult<T> {
    fn from(failure: NetworkFailure) -> Self {
        match failure {
            NetworkFailure::Rejected { message, code } => {
                NetworkResult::Rejected { message, code }
            }
            NetworkFailure::Transport(cause) => {
                NetworkResult::TransportFailure(cause)
            }
        }
    }
}

impl NetworkFailure {
    pub fn cancelled() -> Self {
        NetworkFailure::Transport(TransportError::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, NetworkFailure::Transport(cause) if cause.is_cancelled())
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            NetworkFailure::Rejected { code, .. } => *code,
            NetworkFailure::Transport(_) => None,
        }
    }

    /// Text suitable for showing to an end user.
    ///
    /// Rejections surface the status code and server message. Transport
    /// failures collapse to a generic connectivity notice; the detailed
    /// cause is only logged.
    pub fn user_message(&self) -> String {
        match self {
            NetworkFailure::Rejected { message, code } => {
                let message = message
                    .clone()
                    .or_else(|| code.and_then(reason_phrase).map(str::to_owned))
                    .unwrap_or_else(|| "request was rejected".to_owned());
                match code {
                    Some(code) => format!("Server returned {code}: {message}"),
                    None => message,
                }
            }
            NetworkFailure::Transport(TransportError::Cancelled) => {
                "The request was cancelled.".to_owned()
            }
            NetworkFailure::Transport(_) => {
                "Could not reach the catalogue. \
                 Check your connection and try again."
                    .to_owned()
            }
        }
    }
}
