//! Client configuration.
//!
//! A [`Config`] carries everything the SDK reads at construction time: the
//! API base URL, the credential, an optional product allow-list for the
//! automation dispatchers, and the default page size for list calls. It is
//! read-only once a client has been built from it.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DockhandError, Result};

/// Default page size for automation list calls.
pub const DEFAULT_LIMIT: usize = 1000;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "DOCKHAND_API_URL";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "DOCKHAND_API_KEY";
/// Environment variable holding a comma-separated product allow-list.
pub const ENV_PRODUCTS: &str = "DOCKHAND_PRODUCTS";

/// Configuration for the API client and the automation dispatchers.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the API, e.g. `https://api.example.com/public/v1/`.
    #[serde(alias = "apiEndpoint")]
    pub api_url: String,

    /// API credential. Accepted with or without the `ApiKey ` scheme prefix.
    #[serde(alias = "apiKey")]
    pub api_key: String,

    /// Product ids the automation dispatchers act on. Empty means all.
    #[serde(default)]
    pub products: Vec<String>,

    /// Default `limit` filter applied to automation list calls.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Config {
    /// Create a configuration from explicit url and key.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            products: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Restrict the automation dispatchers to the given product ids.
    pub fn with_products(mut self, products: Vec<String>) -> Self {
        self.products = products;
        self
    }

    /// Override the default page size for list calls.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.as_ref().display(), e))?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()
    }

    /// Load a configuration from the `DOCKHAND_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var(ENV_API_URL)
            .map_err(|_| anyhow::anyhow!("{} is not set", ENV_API_URL))?;
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| anyhow::anyhow!("{} is not set", ENV_API_KEY))?;
        let products = std::env::var(ENV_PRODUCTS)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Config {
            api_url,
            api_key,
            products,
            limit: DEFAULT_LIMIT,
        }
        .validate()
    }

    fn validate(self) -> Result<Self> {
        if self.api_url.is_empty() {
            return Err(DockhandError::Other(anyhow::anyhow!(
                "Configuration has an empty api_url"
            )));
        }
        if self.api_key.is_empty() {
            return Err(DockhandError::Other(anyhow::anyhow!(
                "Configuration has an empty api_key"
            )));
        }
        Ok(self)
    }

    /// The credential in `Authorization` header form.
    ///
    /// The server expects the `ApiKey` scheme; a bare token is prefixed,
    /// an already-prefixed one is passed through.
    pub fn authorization(&self) -> String {
        if self.api_key.starts_with("ApiKey ") {
            self.api_key.clone()
        } else {
            format!("ApiKey {}", self.api_key)
        }
    }

    /// Whether the allow-list admits the given product id.
    pub fn allows_product(&self, product_id: &str) -> bool {
        self.products.is_empty() || self.products.iter().any(|p| p == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_prefixes_bare_keys() {
        let config = Config::new("https://api.example.com/v1/", "SU-000:token");
        assert_eq!(config.authorization(), "ApiKey SU-000:token");
    }

    #[test]
    fn authorization_keeps_prefixed_keys() {
        let config = Config::new("https://api.example.com/v1/", "ApiKey SU-000:token");
        assert_eq!(config.authorization(), "ApiKey SU-000:token");
    }

    #[test]
    fn empty_allow_list_admits_everything() {
        let config = Config::new("https://api.example.com/v1/", "key");
        assert!(config.allows_product("PRD-000-000-000"));
    }

    #[test]
    fn allow_list_filters_products() {
        let config = Config::new("https://api.example.com/v1/", "key")
            .with_products(vec!["PRD-111-111-111".to_string()]);
        assert!(config.allows_product("PRD-111-111-111"));
        assert!(!config.allows_product("PRD-000-000-000"));
    }

    #[test]
    fn config_parses_camel_case_aliases() {
        let config: Config = serde_json::from_str(
            r#"{"apiEndpoint": "https://api.example.com/v1/", "apiKey": "key"}"#,
        )
        .unwrap();
        assert_eq!(config.api_url, "https://api.example.com/v1/");
        assert_eq!(config.limit, DEFAULT_LIMIT);
    }
}
