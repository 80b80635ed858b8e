//! Repositories over the endpoint contracts.
//!
//! Every public operation returns a [`NetworkResult`](crate::NetworkResult).
//! Classification and the per-call log event happen here and nowhere else.

mod artwork;
mod exhibition;

#[cfg(test)]
pub(crate) mod mocks;

pub use artwork::ArtworkRepository;
pub use exhibition::ExhibitionRepository;

use std::future::Future;

use tokio_util::sync::CancellationToken;
use vitrine_contracts::prelude::{EndpointResult, TransportError};

/// Race an endpoint call against a cancellation token. A cancelled call is
/// reported as a transport failure and the in-flight request is dropped.
async fn until_cancelled<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = EndpointResult<T>>,
) -> EndpointResult<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(TransportError::Cancelled),
        outcome = call => outcome,
    }
}
