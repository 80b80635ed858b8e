use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use vitrine_contracts::prelude::ArtworkEndpoint;
use vitrine_model::prelude::{
    Artwork, ArtworkId, ArtworkSource, ArtworkSummary, Page, SearchQuery,
};

use super::until_cancelled;
use crate::network::{
    Expect, NETWORK_TARGET, NetworkResult, classify, log_outcome,
};

/// Read access to the artwork catalogue.
///
/// Cheap to clone; clones share the same endpoint.
#[derive(Debug, Clone)]
pub struct ArtworkRepository {
    endpoint: Arc<dyn ArtworkEndpoint>,
}

impl ArtworkRepository {
    pub fn new(endpoint: Arc<dyn ArtworkEndpoint>) -> Self {
        Self { endpoint }
    }

    /// Fetch one page of a source's collection.
    pub async fn artwork_page(
        &self,
        source: &ArtworkSource,
        page: u32,
        limit: u32,
    ) -> NetworkResult<Page<ArtworkSummary>> {
        self.artwork_page_cancellable(
            source,
            page,
            limit,
            &CancellationToken::new(),
        )
        .await
    }

    /// [`artwork_page`](Self::artwork_page), abandoned as a transport
    /// failure once `cancel` fires.
    pub async fn artwork_page_cancellable(
        &self,
        source: &ArtworkSource,
        page: u32,
        limit: u32,
        cancel: &CancellationToken,
    ) -> NetworkResult<Page<ArtworkSummary>> {
        debug!(
            target: NETWORK_TARGET,
            %source,
            page,
            limit,
            "fetching artwork page"
        );
        let outcome = until_cancelled(
            cancel,
            self.endpoint
                .fetch_artwork_page(source, Some(limit), Some(page)),
        )
        .await;

        let result = classify(outcome, Expect::Ok);
        log_outcome("fetch_artwork_page", &result);
        result
    }

    pub async fn artwork(
        &self,
        source: &ArtworkSource,
        id: &ArtworkId,
    ) -> NetworkResult<Artwork> {
        debug!(target: NETWORK_TARGET, %source, %id, "fetching artwork");
        let outcome = self.endpoint.fetch_artwork_by_id(source, id).await;

        let result = classify(outcome, Expect::Ok);
        log_outcome("fetch_artwork_by_id", &result);
        result
    }

    /// Run a structured search. The query kind selects the endpoint.
    pub async fn search(
        &self,
        query: &SearchQuery,
    ) -> NetworkResult<Page<ArtworkSummary>> {
        self.search_cancellable(query, &CancellationToken::new())
            .await
    }

    pub async fn search_cancellable(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> NetworkResult<Page<ArtworkSummary>> {
        debug!(
            target: NETWORK_TARGET,
            kind = ?query.kind,
            clauses = query.must.len(),
            page = query.page,
            size = query.size,
            "searching artworks"
        );
        let outcome =
            until_cancelled(cancel, self.endpoint.search_artworks(query)).await;

        let result = classify(outcome, Expect::Ok);
        log_outcome("search_artworks", &result);
        result
    }
}
