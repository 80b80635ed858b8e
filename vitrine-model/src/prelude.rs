//! Convenience re-exports for consumers that touch most of the model.

pub use crate::artwork::{Artwork, ArtworkSummary};
pub use crate::exhibition::{
    ArtworkRef, Exhibition, ExhibitionPatch, NewExhibition,
};
pub use crate::ids::{ArtworkId, ArtworkSource, ExhibitionId};
pub use crate::page::{Page, STARTING_PAGE_INDEX};
pub use crate::search::{
    ArtworkQuery, SearchClause, SearchField, SearchKind, SearchQuery,
    SortDirection, SortSpec,
};
