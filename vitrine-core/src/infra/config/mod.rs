pub mod loader;
pub mod models;
pub mod sources;

pub use loader::{
    CONFIG_TARGET, ConfigLoad, ConfigLoadError, ConfigLoader,
    ConfigLoaderOptions,
};
pub use models::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
    normalize_base_url,
};
pub use sources::{EnvConfig, FileConfig};
