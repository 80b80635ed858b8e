use std::fmt::Debug;

use async_trait::async_trait;
use vitrine_model::prelude::{
    Artwork, ArtworkId, ArtworkRef, ArtworkSource, ArtworkSummary,
    Exhibition, ExhibitionId, ExhibitionPatch, NewExhibition, Page,
    SearchQuery,
};

use crate::response::EndpointResult;

/// Read-only artwork catalogue operations.
///
/// Calls are idempotent and stateless, so a single implementation may be
/// shared by any number of concurrent paging sessions.
#[async_trait]
pub trait ArtworkEndpoint: Send + Sync + Debug {
    /// `GET artworks/{source}?limit=&page=`
    async fn fetch_artwork_page(
        &self,
        source: &ArtworkSource,
        limit: Option<u32>,
        page: Option<u32>,
    ) -> EndpointResult<Page<ArtworkSummary>>;

    /// `GET artworks/{source}/{id}`
    async fn fetch_artwork_by_id(
        &self,
        source: &ArtworkSource,
        id: &ArtworkId,
    ) -> EndpointResult<Artwork>;

    /// `POST artworks/search` or `POST artworks/search/advanced`, chosen by
    /// `query.kind`.
    async fn search_artworks(
        &self,
        query: &SearchQuery,
    ) -> EndpointResult<Page<ArtworkSummary>>;
}

/// CRUD operations on user-owned exhibitions.
#[async_trait]
pub trait ExhibitionEndpoint: Send + Sync + Debug {
    /// `GET exhibitions`
    async fn list_exhibitions(&self) -> EndpointResult<Vec<Exhibition>>;

    /// `GET exhibitions/{id}`
    async fn fetch_exhibition(
        &self,
        id: ExhibitionId,
    ) -> EndpointResult<Exhibition>;

    /// `POST exhibitions`
    async fn create_exhibition(
        &self,
        exhibition: &NewExhibition,
    ) -> EndpointResult<Exhibition>;

    /// `PATCH exhibitions/{id}`
    async fn update_exhibition(
        &self,
        id: ExhibitionId,
        patch: &ExhibitionPatch,
    ) -> EndpointResult<Exhibition>;

    /// `POST exhibitions/{id}/artworks`
    async fn add_artwork(
        &self,
        id: ExhibitionId,
        artwork: &ArtworkRef,
    ) -> EndpointResult<Exhibition>;

    /// `DELETE exhibitions/{id}/artworks/{source}/{artwork_id}`
    async fn remove_artwork(
        &self,
        id: ExhibitionId,
        artwork: &ArtworkRef,
    ) -> EndpointResult<()>;

    /// `DELETE exhibitions/{id}`
    async fn delete_exhibition(&self, id: ExhibitionId)
    -> EndpointResult<()>;
}
