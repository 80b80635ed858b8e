use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use vitrine_contracts::prelude::{
    ArtworkEndpoint, EndpointResult, ExhibitionEndpoint,
};
use vitrine_model::prelude::{
    Artwork, ArtworkId, ArtworkRef, ArtworkSource, ArtworkSummary,
    Exhibition, ExhibitionId, ExhibitionPatch, NewExhibition, Page,
    SearchQuery,
};

mock! {
    #[derive(Debug)]
    pub Artworks {}

    #[async_trait]
    impl ArtworkEndpoint for Artworks {
        async fn fetch_artwork_page(
            &self,
            source: &ArtworkSource,
            limit: Option<u32>,
            page: Option<u32>,
        ) -> EndpointResult<Page<ArtworkSummary>>;
        async fn fetch_artwork_by_id(
            &self,
            source: &ArtworkSource,
            id: &ArtworkId,
        ) -> EndpointResult<Artwork>;
        async fn search_artworks(
            &self,
            query: &SearchQuery,
        ) -> EndpointResult<Page<ArtworkSummary>>;
    }
}

mock! {
    #[derive(Debug)]
    pub Exhibitions {}

    #[async_trait]
    impl ExhibitionEndpoint for Exhibitions {
        async fn list_exhibitions(&self) -> EndpointResult<Vec<Exhibition>>;
        async fn fetch_exhibition(
            &self,
            id: ExhibitionId,
        ) -> EndpointResult<Exhibition>;
        async fn create_exhibition(
            &self,
            exhibition: &NewExhibition,
        ) -> EndpointResult<Exhibition>;
        async fn update_exhibition(
            &self,
            id: ExhibitionId,
            patch: &ExhibitionPatch,
        ) -> EndpointResult<Exhibition>;
        async fn add_artwork(
            &self,
            id: ExhibitionId,
            artwork: &ArtworkRef,
        ) -> EndpointResult<Exhibition>;
        async fn remove_artwork(
            &self,
            id: ExhibitionId,
            artwork: &ArtworkRef,
        ) -> EndpointResult<()>;
        async fn delete_exhibition(
            &self,
            id: ExhibitionId,
        ) -> EndpointResult<()>;
    }
}

pub fn summary(id: &str, title: &str) -> ArtworkSummary {
    ArtworkSummary {
        id: ArtworkId::new(id).expect("valid artwork id"),
        title: title.to_owned(),
        date: None,
        artist: None,
        image_id: None,
    }
}

pub fn summaries(page_index: u32, count: u32) -> Vec<ArtworkSummary> {
    (0..count)
        .map(|offset| {
            let id = format!("{page_index}-{offset}");
            summary(&id, &format!("Work {id}"))
        })
        .collect()
}

/// Formatted log output captured on the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route this thread's events here until the guard drops.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
