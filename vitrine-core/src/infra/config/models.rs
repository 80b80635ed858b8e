use std::time::Duration;

use url::Url;
use vitrine_model::prelude::ArtworkSource;

use super::loader::ConfigLoadError;
use crate::query::DEFAULT_PAGE_SIZE;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str =
    concat!("vitrine/", env!("CARGO_PKG_VERSION"));

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalised API root; routes are resolved relative to it.
    pub base_url: Url,
    pub timeout: Duration,
    pub page_size: u32,
    pub default_source: Option<ArtworkSource>,
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for `base_url` with every other value defaulted.
    pub fn new(base_url: &str) -> Result<Self, ConfigLoadError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            default_source: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_default_source(mut self, source: ArtworkSource) -> Self {
        self.default_source = Some(source);
        self
    }
}

/// Trim, drop trailing slashes and assume `http://` when no scheme is given.
pub fn normalize_base_url(raw: &str) -> Result<Url, ConfigLoadError> {
    let trimmed = raw.trim();
    let (scheme, rest) = match trimmed.split_once("://") {
        Some((scheme, rest)) if scheme == "http" || scheme == "https" => {
            (scheme, rest)
        }
        Some(_) => {
            return Err(ConfigLoadError::InvalidValue {
                key: "base_url",
                value: raw.to_string(),
                reason: "scheme must be http or https".into(),
            });
        }
        None => ("http", trimmed),
    };
    let candidate = format!("{scheme}://{}", rest.trim_end_matches('/'));

    let url = Url::parse(&candidate).map_err(|source| {
        ConfigLoadError::InvalidBaseUrl {
            value: raw.to_string(),
            source,
        }
    })?;

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigLoadError::InvalidValue {
            key: "base_url",
            value: raw.to_string(),
            reason: "must be an absolute http(s) URL with a host".into(),
        });
    }

    Ok(url)
}
