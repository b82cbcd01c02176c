//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGE_WINDOW};

fn default_api_base_url() -> String {
    "http://localhost:8000/api/admin".to_string()
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_page_window() -> usize {
    DEFAULT_PAGE_WINDOW
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// Settings of the back-office client.
pub struct AdminConfig {
    /// Root of the admin REST API, e.g. `https://shop.example/api/admin`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_page_window")]
    pub page_window: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub skip_unchanged_reload: bool,
    /// Pre-issued bearer token; a login replaces it for the session.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            page_window: DEFAULT_PAGE_WINDOW,
            request_timeout_secs: default_request_timeout_secs(),
            skip_unchanged_reload: false,
            token: None,
        }
    }
}

impl AdminConfig {
    /// Loads `config/default`, then `config/{app_env}`, then `APP_*`
    /// environment variables.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"), app_env)
    }

    pub fn load_from(dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let base = dir.join("default");
        let profile = dir.join(app_env);

        let settings = Config::builder()
            .add_source(File::with_name(&base.to_string_lossy()).required(false))
            .add_source(File::with_name(&profile.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?;

        let config: AdminConfig = settings.try_deserialize()?;
        if config.items_per_page == 0 {
            return Err(ConfigError::Message(
                "items_per_page must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}
