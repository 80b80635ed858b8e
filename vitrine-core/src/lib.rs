//! Core library for vitrine.
//!
//! The crate is organised leaf-first:
//!
//! - [`network`]: the closed [`NetworkResult`] outcome type and the single
//!   place where raw endpoint outcomes are classified and logged.
//! - [`repository`]: artwork and exhibition repositories that wrap the
//!   endpoint contracts and only ever return [`NetworkResult`].
//! - [`paging`]: the incremental, cursor-based [`paging::Pager`] and the
//!   page sources it drives.
//! - [`query`]: translation of caller-facing [`ArtworkQuery`] values into
//!   structured [`SearchQuery`] requests.
//! - [`infra`]: the reqwest-backed HTTP binding and client configuration.

pub mod api;
pub mod infra;
pub mod network;
pub mod paging;
pub mod query;
pub mod repository;

pub use infra::HttpEndpoint;
pub use infra::config::{ClientConfig, ConfigLoadError, ConfigLoader};
pub use network::{NetworkFailure, NetworkResult};
pub use paging::{
    ArtworkPager, LoadRequest, LoadResult, Pager, PagerConfig, RefreshAnchor,
    SearchPager, SessionState,
};
pub use query::{QueryError, SearchQueryBuilder};
pub use repository::{ArtworkRepository, ExhibitionRepository};
pub use vitrine_contracts::prelude::{
    ArtworkEndpoint, ExhibitionEndpoint, RawResponse, TransportError,
};
pub use vitrine_model::prelude::*;
