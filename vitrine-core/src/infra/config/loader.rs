use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::debug;
use vitrine_model::prelude::ArtworkSource;

use super::{
    models::{
        ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
        normalize_base_url,
    },
    sources::{EnvConfig, FileConfig, PAGE_SIZE_VAR, TIMEOUT_SECS_VAR},
};
use crate::query::DEFAULT_PAGE_SIZE;

pub const CONFIG_TARGET: &str = "vitrine::config";

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["vitrine.toml", "config/vitrine.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

/// A loaded configuration and where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: ClientConfig,
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, then the process environment, then the TOML file.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Resolve configuration from an already gathered environment.
    ///
    /// Environment values override file values; defaults fill the rest.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let config = compose_config(file_config.unwrap_or_default(), env)?;

        Ok(ConfigLoad {
            config,
            config_path,
            env_file_loaded: false,
        })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        debug!(
            target: CONFIG_TARGET,
            path = %path.display(),
            "loaded configuration file"
        );
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file: FileConfig,
    env: EnvConfig,
) -> Result<ClientConfig, ConfigLoadError> {
    let FileConfig {
        api: file_api,
        paging: file_paging,
        catalogue: file_catalogue,
    } = file;

    let base_url = env
        .base_url
        .or(file_api.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout_secs = match env.timeout_secs {
        Some(raw) => Some(parse_positive(TIMEOUT_SECS_VAR, &raw)?),
        None => file_api.timeout_secs,
    };
    let timeout = match timeout_secs {
        Some(0) => {
            return Err(ConfigLoadError::InvalidValue {
                key: "timeout_secs",
                value: "0".into(),
                reason: "must be at least one second".into(),
            });
        }
        Some(secs) => Duration::from_secs(secs),
        None => DEFAULT_TIMEOUT,
    };

    let page_size = match env.page_size {
        Some(raw) => Some(parse_positive(PAGE_SIZE_VAR, &raw)?),
        None => file_paging.page_size,
    };
    let page_size = match page_size {
        Some(0) => {
            return Err(ConfigLoadError::InvalidValue {
                key: "page_size",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Some(size) => size,
        None => DEFAULT_PAGE_SIZE,
    };

    let default_source = env
        .default_source
        .or(file_catalogue.default_source)
        .map(|raw| {
            ArtworkSource::new(raw.clone()).map_err(|err| {
                ConfigLoadError::InvalidValue {
                    key: "default_source",
                    value: raw,
                    reason: err.to_string(),
                }
            })
        })
        .transpose()?;

    Ok(ClientConfig {
        base_url: normalize_base_url(&base_url)?,
        timeout,
        page_size,
        default_source,
        user_agent: env
            .user_agent
            .or(file_api.user_agent)
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
    })
}

fn parse_positive<N: std::str::FromStr>(
    key: &'static str,
    raw: &str,
) -> Result<N, ConfigLoadError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigLoadError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "expected a positive integer".into(),
        })
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid base URL '{value}'")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid value for {key} '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("vitrine.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn file_values_are_used() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            [api]
            base_url = "https://museum.example/api/"
            timeout_secs = 5

            [paging]
            page_size = 50

            [catalogue]
            default_source = "chicago"
            "#,
        );

        let load = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(EnvConfig::default())
            .unwrap();

        assert_eq!(load.config_path.as_deref(), Some(path.as_path()));
        let config = load.config;
        assert_eq!(config.base_url.as_str(), "https://museum.example/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.default_source.unwrap().as_str(), "chicago");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            [api]
            base_url = "https://museum.example"

            [paging]
            page_size = 50
            "#,
        );

        let env = EnvConfig {
            base_url: Some("localhost:9000".into()),
            page_size: Some("10".into()),
            ..EnvConfig::default()
        };
        let config = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(env)
            .unwrap()
            .config;

        assert_eq!(config.base_url.host_str(), Some("localhost"));
        assert_eq!(config.base_url.port(), Some(9000));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn env_config_path_is_honoured() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[paging]\npage_size = 7\n");

        let env = EnvConfig {
            config_path: Some(path),
            ..EnvConfig::default()
        };
        let config = ConfigLoader::new().load_with_env(env).unwrap().config;
        assert_eq!(config.page_size, 7);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");

        let err = ConfigLoader::new()
            .with_config_path(&missing)
            .load_with_env(EnvConfig::default())
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigLoadError::MissingConfig { path } if path == missing
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[api\nbase_url = ");

        let err = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(EnvConfig::default())
            .unwrap_err();

        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[api]\nbase_uri = \"http://x\"\n");

        let err = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(EnvConfig::default())
            .unwrap_err();

        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let env = EnvConfig {
            page_size: Some("0".into()),
            ..EnvConfig::default()
        };
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let err = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(env)
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigLoadError::InvalidValue { key: "page_size", .. }
        ));
    }

    #[test]
    fn non_numeric_timeout_is_invalid() {
        let env = EnvConfig {
            timeout_secs: Some("soon".into()),
            ..EnvConfig::default()
        };
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let err = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(env)
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigLoadError::InvalidValue { key: TIMEOUT_SECS_VAR, .. }
        ));
    }

    #[test]
    fn bad_default_source_is_invalid() {
        let env = EnvConfig {
            default_source: Some("Not A Slug!".into()),
            ..EnvConfig::default()
        };
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let err = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(env)
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigLoadError::InvalidValue { key: "default_source", .. }
        ));
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let load = ConfigLoader::new()
            .with_config_path(&path)
            .with_env_file(dir.path().join("absent.env"))
            .load()
            .unwrap();

        assert!(!load.env_file_loaded);
    }
}
