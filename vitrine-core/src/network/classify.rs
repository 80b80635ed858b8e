use reqwest::StatusCode;
use vitrine_contracts::prelude::{EndpointResult, RawResponse};

use super::NetworkResult;

/// Success code an operation requires. Any other status, including other
/// 2xx codes, is a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// `200 OK` with a body.
    Ok,
    /// `201 Created` with a body.
    Created,
    /// `204 No Content`.
    NoContent,
}

impl Expect {
    pub fn status(self) -> u16 {
        match self {
            Expect::Ok => 200,
            Expect::Created => 201,
            Expect::NoContent => 204,
        }
    }
}

/// Canonical reason phrase for a status code, if it has one.
pub fn reason_phrase(status: u16) -> Option<&'static str> {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
}

/// Classify the outcome of a call whose success carries a body.
///
/// A matching status with no body is treated as a rejection at that status:
/// the server answered, but not with anything usable.
pub fn classify<T>(
    outcome: EndpointResult<T>,
    expect: Expect,
) -> NetworkResult<T> {
    let response = match outcome {
        Ok(response) => response,
        Err(cause) => return NetworkResult::TransportFailure(cause),
    };

    let RawResponse {
        status,
        message,
        body,
    } = response;

    if status == expect.status() {
        return match body {
            Some(body) => NetworkResult::Success(body),
            None => NetworkResult::Rejected {
                message: Some(
                    message
                        .unwrap_or_else(|| "response body was empty".into()),
                ),
                code: Some(status),
            },
        };
    }

    NetworkResult::Rejected {
        message: message
            .or_else(|| reason_phrase(status).map(str::to_owned)),
        code: Some(status),
    }
}

/// Classify the outcome of a call that succeeds with `204 No Content`.
pub fn classify_no_content(outcome: EndpointResult<()>) -> NetworkResult<()> {
    classify(
        outcome.map(|response| RawResponse {
            body: Some(()),
            ..response
        }),
        Expect::NoContent,
    )
}
