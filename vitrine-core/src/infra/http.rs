use std::error::Error as StdError;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;
use url::Url;
use vitrine_contracts::prelude::{
    ArtworkEndpoint, EndpointResult, ExhibitionEndpoint, RawResponse,
    TransportError,
};
use vitrine_model::prelude::{
    Artwork, ArtworkId, ArtworkRef, ArtworkSource, ArtworkSummary,
    Exhibition, ExhibitionId, ExhibitionPatch, NewExhibition, Page,
    SearchKind, SearchQuery,
};

use super::config::ClientConfig;
use crate::api::routes::{artworks, exhibitions, utils};
use crate::network::reason_phrase;

pub const HTTP_TARGET: &str = "vitrine::http";

/// reqwest-backed binding of the endpoint contracts.
///
/// Reports what the server said without judging it: any status is returned
/// as a [`RawResponse`], and only failures to obtain or decode a response
/// become [`TransportError`]s.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: Client,
    base_url: Url,
}

impl HttpEndpoint {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| TransportError::Configuration(error_chain(&err)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a route template against the base URL. Parameter values are
    /// percent-encoded as single path segments.
    pub fn build_url(
        &self,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TransportError::Configuration(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(utils::segments(route, params));
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<RequestBuilder, TransportError> {
        let url = self.build_url(route, params)?;
        debug!(target: HTTP_TARGET, %method, %url, "sending request");
        Ok(self.client.request(method, url))
    }

    fn request_with_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &str,
        params: &[(&str, &str)],
        body: &B,
    ) -> Result<RequestBuilder, TransportError> {
        Ok(self.request(method, route, params)?.json(body))
    }

    /// Send a request whose success carries a JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> EndpointResult<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(
            target: HTTP_TARGET,
            status = status.as_u16(),
            "received response"
        );

        if !status.is_success() {
            return Ok(rejected_response(status, response).await);
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(RawResponse::empty(status.as_u16()));
        }

        let body = serde_json::from_slice::<T>(&bytes)
            .map_err(|err| TransportError::Decode(err.to_string()))?;
        Ok(RawResponse::with_body(status.as_u16(), body))
    }

    /// Send a request whose success carries no body. Any content returned
    /// with a success status is ignored.
    async fn execute_empty(
        &self,
        request: RequestBuilder,
    ) -> EndpointResult<()> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(
            target: HTTP_TARGET,
            status = status.as_u16(),
            "received response"
        );

        if !status.is_success() {
            return Ok(rejected_response(status, response).await);
        }
        Ok(RawResponse::empty(status.as_u16()))
    }
}

#[async_trait]
impl ArtworkEndpoint for HttpEndpoint {
    async fn fetch_artwork_page(
        &self,
        source: &ArtworkSource,
        limit: Option<u32>,
        page: Option<u32>,
    ) -> EndpointResult<Page<ArtworkSummary>> {
        let query: Vec<(&str, u32)> = [("limit", limit), ("page", page)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect();

        let request = self
            .request(
                Method::GET,
                artworks::COLLECTION,
                &[("source", source.as_str())],
            )?
            .query(&query);
        self.execute(request).await
    }

    async fn fetch_artwork_by_id(
        &self,
        source: &ArtworkSource,
        id: &ArtworkId,
    ) -> EndpointResult<Artwork> {
        let request = self.request(
            Method::GET,
            artworks::ITEM,
            &[("source", source.as_str()), ("id", id.as_str())],
        )?;
        self.execute(request).await
    }

    async fn search_artworks(
        &self,
        query: &SearchQuery,
    ) -> EndpointResult<Page<ArtworkSummary>> {
        let route = match query.kind {
            SearchKind::Basic => artworks::SEARCH,
            SearchKind::Advanced => artworks::SEARCH_ADVANCED,
        };
        let request = self.request_with_body(Method::POST, route, &[], query)?;
        self.execute(request).await
    }
}

#[async_trait]
impl ExhibitionEndpoint for HttpEndpoint {
    async fn list_exhibitions(&self) -> EndpointResult<Vec<Exhibition>> {
        let request =
            self.request(Method::GET, exhibitions::COLLECTION, &[])?;
        self.execute(request).await
    }

    async fn fetch_exhibition(
        &self,
        id: ExhibitionId,
    ) -> EndpointResult<Exhibition> {
        let id = id.to_string();
        let request = self.request(
            Method::GET,
            exhibitions::ITEM,
            &[("id", id.as_str())],
        )?;
        self.execute(request).await
    }

    async fn create_exhibition(
        &self,
        exhibition: &NewExhibition,
    ) -> EndpointResult<Exhibition> {
        let request = self.request_with_body(
            Method::POST,
            exhibitions::COLLECTION,
            &[],
            exhibition,
        )?;
        self.execute(request).await
    }

    async fn update_exhibition(
        &self,
        id: ExhibitionId,
        patch: &ExhibitionPatch,
    ) -> EndpointResult<Exhibition> {
        let id = id.to_string();
        let request = self.request_with_body(
            Method::PATCH,
            exhibitions::ITEM,
            &[("id", id.as_str())],
            patch,
        )?;
        self.execute(request).await
    }

    async fn add_artwork(
        &self,
        id: ExhibitionId,
        artwork: &ArtworkRef,
    ) -> EndpointResult<Exhibition> {
        let id = id.to_string();
        let request = self.request_with_body(
            Method::POST,
            exhibitions::ARTWORKS,
            &[("id", id.as_str())],
            artwork,
        )?;
        self.execute(request).await
    }

    async fn remove_artwork(
        &self,
        id: ExhibitionId,
        artwork: &ArtworkRef,
    ) -> EndpointResult<()> {
        let id = id.to_string();
        let request = self.request(
            Method::DELETE,
            exhibitions::ARTWORK,
            &[
                ("id", id.as_str()),
                ("source", artwork.source.as_str()),
                ("artwork_id", artwork.artwork_id.as_str()),
            ],
        )?;
        self.execute_empty(request).await
    }

    async fn delete_exhibition(
        &self,
        id: ExhibitionId,
    ) -> EndpointResult<()> {
        let id = id.to_string();
        let request = self.request(
            Method::DELETE,
            exhibitions::ITEM,
            &[("id", id.as_str())],
        )?;
        self.execute_empty(request).await
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

async fn rejected_response<T>(
    status: StatusCode,
    response: reqwest::Response,
) -> RawResponse<T> {
    // An unreadable error body still leaves the status to report.
    let text = response.text().await.unwrap_or_default();
    RawResponse {
        status: status.as_u16(),
        message: server_message(status, &text),
        body: None,
    }
}

/// Server-supplied explanation for a rejection: a JSON `message` or `error`
/// field, else the text body, else the canonical reason phrase.
fn server_message(status: StatusCode, text: &str) -> Option<String> {
    let text = text.trim();
    if let Ok(body) = serde_json::from_str::<ErrorBody>(text)
        && let Some(message) = body.message.or(body.error)
        && !message.trim().is_empty()
    {
        return Some(message);
    }
    if !text.is_empty() {
        return Some(text.to_string());
    }
    reason_phrase(status.as_u16()).map(str::to_string)
}

fn transport_error(err: reqwest::Error) -> TransportError {
    let detail = error_chain(&err);
    if err.is_timeout() {
        TransportError::Timeout(detail)
    } else if err.is_connect() {
        TransportError::Connect(detail)
    } else if err.is_decode() {
        TransportError::Decode(detail)
    } else if err.is_builder() {
        TransportError::Configuration(detail)
    } else {
        TransportError::Request(detail)
    }
}

fn error_chain(err: &dyn StdError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
