use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use vitrine_model::prelude::{ArtworkSource, ArtworkSummary, Page, SearchQuery};

use crate::network::NetworkResult;
use crate::repository::ArtworkRepository;

/// Something a [`Pager`](super::Pager) can pull pages from.
///
/// Implementations must treat `cancel` as a request to abandon the call and
/// report it as a cancelled transport failure.
#[async_trait]
pub trait PagingSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    async fn load_page(
        &self,
        page: u32,
        size: u32,
        cancel: &CancellationToken,
    ) -> NetworkResult<Page<Self::Item>>;
}

/// Pages of one source's collection.
#[derive(Debug, Clone)]
pub struct ArtworkPageSource {
    repository: ArtworkRepository,
    source: ArtworkSource,
}

impl ArtworkPageSource {
    pub fn new(repository: ArtworkRepository, source: ArtworkSource) -> Self {
        Self { repository, source }
    }

    pub fn source(&self) -> &ArtworkSource {
        &self.source
    }
}

#[async_trait]
impl PagingSource for ArtworkPageSource {
    type Item = ArtworkSummary;

    async fn load_page(
        &self,
        page: u32,
        size: u32,
        cancel: &CancellationToken,
    ) -> NetworkResult<Page<ArtworkSummary>> {
        self.repository
            .artwork_page_cancellable(&self.source, page, size, cancel)
            .await
    }
}

/// Pages of a structured search. The query's own window is replaced by the
/// one each load asks for.
#[derive(Debug, Clone)]
pub struct SearchPageSource {
    repository: ArtworkRepository,
    query: SearchQuery,
}

impl SearchPageSource {
    pub fn new(repository: ArtworkRepository, query: SearchQuery) -> Self {
        Self { repository, query }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

#[async_trait]
impl PagingSource for SearchPageSource {
    type Item = ArtworkSummary;

    async fn load_page(
        &self,
        page: u32,
        size: u32,
        cancel: &CancellationToken,
    ) -> NetworkResult<Page<ArtworkSummary>> {
        let query = self.query.with_window(page, size);
        self.repository.search_cancellable(&query, cancel).await
    }
}
