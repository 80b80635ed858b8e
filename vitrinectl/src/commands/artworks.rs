use anyhow::{Context, Result, anyhow};
use tracing::info;
use vitrine_core::paging::{ArtworkPageSource, SearchPageSource};
use vitrine_core::{
    ArtworkId, ArtworkPager, ArtworkSource, PagerConfig, SearchKind,
    SearchPager, SearchQueryBuilder,
};

use super::{Client, collect_all, collect_pages, settle};
use crate::cli::SearchArgs;
use crate::output;

impl Client {
    pub async fn browse(
        &self,
        source: Option<&str>,
        from: u32,
        pages: u32,
        all: bool,
        page_size: Option<u32>,
        json: bool,
    ) -> Result<()> {
        let source = match source {
            Some(raw) => raw.parse::<ArtworkSource>()?,
            None => self.config.default_source.clone().ok_or_else(|| {
                anyhow!("no source given and no default source configured")
            })?,
        };
        let config = PagerConfig::with_page_size(
            page_size.unwrap_or(self.config.page_size),
        );
        info!(%source, page_size = config.page_size, "browsing artworks");

        let pager = ArtworkPager::new(
            ArtworkPageSource::new(self.artworks.clone(), source),
            config,
        );
        let items = if all {
            collect_all(&pager).await?
        } else {
            collect_pages(&pager, from, pages).await?
        };
        output::summaries(&items, json)
    }

    pub async fn show(&self, source: &str, id: &str, json: bool) -> Result<()> {
        let source = source.parse::<ArtworkSource>()?;
        let id = id.parse::<ArtworkId>()?;
        let artwork = settle(self.artworks.artwork(&source, &id).await)
            .with_context(|| format!("failed to fetch {source}/{id}"))?;
        output::artwork(&artwork, json)
    }

    pub async fn search(&self, args: SearchArgs, json: bool) -> Result<()> {
        let mut builder = SearchQueryBuilder::new().kind(if args.advanced {
            SearchKind::Advanced
        } else {
            SearchKind::Basic
        });
        if let Some(text) = args.text {
            builder = builder.text(text);
        }
        if let Some(title) = args.title {
            builder = builder.title(title);
        }
        if let Some(artist) = args.artist {
            builder = builder.artist(artist);
        }
        if let Some(medium) = args.medium {
            builder = builder.medium(medium);
        }
        if let Some(category) = args.category {
            builder = builder.category(category);
        }
        if args.sort.is_some() || args.order.is_some() {
            let mut query = builder.query().clone();
            query.sort_field = args.sort.map(Into::into);
            query.sort_direction = args.order.map(Into::into);
            builder = SearchQueryBuilder::from_query(query);
        }
        if let Some(limit) = args.limit {
            builder = builder.limit(limit);
        }
        if let Some(page) = args.page {
            builder = builder.page(page);
        }

        let query = builder.build()?;
        let first_page = query.page;
        let pager = SearchPager::new(
            SearchPageSource::new(self.artworks.clone(), query.clone()),
            PagerConfig::with_page_size(query.size),
        );
        let items = collect_pages(&pager, first_page, args.pages).await?;
        output::summaries(&items, json)
    }
}
