use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_PATH_VAR: &str = "VITRINE_CONFIG";
pub const BASE_URL_VAR: &str = "VITRINE_BASE_URL";
pub const TIMEOUT_SECS_VAR: &str = "VITRINE_TIMEOUT_SECS";
pub const PAGE_SIZE_VAR: &str = "VITRINE_PAGE_SIZE";
pub const SOURCE_VAR: &str = "VITRINE_SOURCE";
pub const USER_AGENT_VAR: &str = "VITRINE_USER_AGENT";

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
    #[serde(default)]
    pub paging: FilePagingConfig,
    #[serde(default)]
    pub catalogue: FileCatalogueConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilePagingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCatalogueConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_source: Option<String>,
}

/// Configuration gathered from the process environment.
///
/// Numeric values are kept raw so a malformed value is reported instead of
/// silently falling back to a default.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<String>,
    pub page_size: Option<String>,
    pub default_source: Option<String>,
    pub user_agent: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: non_empty_var(CONFIG_PATH_VAR).map(PathBuf::from),
            base_url: non_empty_var(BASE_URL_VAR),
            timeout_secs: non_empty_var(TIMEOUT_SECS_VAR),
            page_size: non_empty_var(PAGE_SIZE_VAR),
            default_source: non_empty_var(SOURCE_VAR),
            user_agent: non_empty_var(USER_AGENT_VAR),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}
