//! Core data model definitions shared across vitrine crates.
#![allow(missing_docs)]

pub mod artwork;
pub mod error;
pub mod exhibition;
pub mod ids;
pub mod page;
pub mod prelude;
pub mod search;

// Intentionally curated re-exports for downstream consumers.
pub use artwork::{Artwork, ArtworkSummary};
pub use error::{ModelError, Result as ModelResult};
pub use exhibition::{ArtworkRef, Exhibition, ExhibitionPatch, NewExhibition};
pub use ids::{ArtworkId, ArtworkSource, ExhibitionId};
pub use page::{Page, STARTING_PAGE_INDEX};
pub use search::{
    ArtworkQuery, SearchClause, SearchField, SearchKind, SearchQuery,
    SortDirection, SortSpec,
};
