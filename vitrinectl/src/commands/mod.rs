mod artworks;
mod exhibitions;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use futures::StreamExt;
use vitrine_core::paging::PagingSource;
use vitrine_core::{
    ArtworkRepository, ClientConfig, ExhibitionRepository, HttpEndpoint,
    LoadRequest, LoadResult, NetworkFailure, NetworkResult, Pager,
};

/// Repositories bound to one configured HTTP endpoint.
pub struct Client {
    config: ClientConfig,
    artworks: ArtworkRepository,
    exhibitions: ExhibitionRepository,
}

impl Client {
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let endpoint = Arc::new(
            HttpEndpoint::new(&config)
                .context("failed to build the HTTP client")?,
        );
        Ok(Self {
            artworks: ArtworkRepository::new(endpoint.clone()),
            exhibitions: ExhibitionRepository::new(endpoint),
            config,
        })
    }
}

/// Turn a repository outcome into a report carrying the user-facing message.
pub fn settle<T>(result: NetworkResult<T>) -> Result<T> {
    result.into_result().map_err(failure_report)
}

fn failure_report(failure: NetworkFailure) -> anyhow::Error {
    let message = failure.user_message();
    anyhow::Error::new(failure).context(message)
}

/// Load `pages` pages starting at `from`, stopping early at the end.
async fn collect_pages<S: PagingSource>(
    pager: &Pager<S>,
    from: u32,
    pages: u32,
) -> Result<Vec<S::Item>> {
    if pages == 0 {
        bail!("--pages must be at least 1");
    }

    let mut result = pager
        .load(LoadRequest::Refresh {
            key: Some(from.max(1)),
            load_size: pager.page_size(),
        })
        .await;
    let mut loaded = 1;
    loop {
        if let LoadResult::Error { cause } = &result {
            return Err(failure_report(cause.clone()));
        }
        if loaded >= pages || result.next_key().is_none() {
            break;
        }
        result = pager.load_next().await;
        loaded += 1;
    }
    Ok(pager.items())
}

/// Drain the pager from its first page until an empty page.
async fn collect_all<S: PagingSource>(
    pager: &Pager<S>,
) -> Result<Vec<S::Item>> {
    let mut stream = std::pin::pin!(pager.stream());
    let mut items = Vec::new();
    while let Some(item) = stream.next().await {
        items.push(item.map_err(failure_report)?);
    }
    Ok(items)
}
