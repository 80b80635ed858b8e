use crate::transport::TransportError;

/// What an endpoint observed: a status line, an optional server message and
/// an optional decoded body.
///
/// `body` is `None` when the response carried no content. A body that was
/// present but failed to decode is never represented here; bindings report
/// it as [`TransportError::Decode`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse<T> {
    pub status: u16,
    pub message: Option<String>,
    pub body: Option<T>,
}

impl<T> RawResponse<T> {
    pub fn with_body(status: u16, body: T) -> Self {
        Self {
            status,
            message: None,
            body: Some(body),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            message: None,
            body: None,
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            body: None,
        }
    }

    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of a single endpoint call.
pub type EndpointResult<T> = Result<RawResponse<T>, TransportError>;
