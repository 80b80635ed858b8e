//! Trait surfaces that describe the remote catalogue service.
//!
//! Implementations are thin bindings: they perform one request and report
//! what came back, without deciding whether it was a success. That decision
//! belongs to the repositories in `vitrine-core`.

pub mod endpoint;
pub mod response;
pub mod transport;

/// Frequently used contract types.
pub mod prelude {
    pub use super::endpoint::{ArtworkEndpoint, ExhibitionEndpoint};
    pub use super::response::{EndpointResult, RawResponse};
    pub use super::transport::{TransportError, TransportErrorKind};
}
