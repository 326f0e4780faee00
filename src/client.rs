//! Thin request/response plumbing over the HTTP layer.
//!
//! An [`ApiClient`] binds an [`HttpClient`] implementation, a shared
//! [`Config`] and one resource root path. It builds paths, attaches the
//! credential, and decodes non-success responses into
//! [`DockhandError::Remote`]; successful bodies are returned raw for the
//! resource layer to deserialize.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{DockhandError, Result};
use crate::http::{ApiRequest, HttpClient};
use crate::models::ServerError;

/// API client scoped to a single resource root (e.g. `requests`).
#[derive(Clone)]
pub struct ApiClient<H> {
    http: H,
    config: Arc<Config>,
    base_path: String,
}

impl<H: HttpClient> ApiClient<H> {
    pub fn new(http: H, config: Arc<Config>, base_path: impl Into<String>) -> Self {
        Self {
            http,
            config,
            base_path: base_path.into(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A sibling client over the same transport, scoped to another resource.
    pub fn with_base(&self, base_path: impl Into<String>) -> ApiClient<H> {
        ApiClient {
            http: self.http.clone(),
            config: self.config.clone(),
            base_path: base_path.into(),
        }
    }

    fn path(&self, sub: &str) -> String {
        let sub = sub.trim_start_matches('/');
        if sub.is_empty() {
            self.base_path.clone()
        } else {
            format!("{}/{}", self.base_path.trim_end_matches('/'), sub)
        }
    }

    /// GET a sub-path with query filters, returning the raw body.
    pub fn get(&self, sub: &str, query: &[(String, String)]) -> Result<String> {
        self.execute("GET", sub, query.to_vec(), None)
    }

    /// POST a JSON body to a sub-path, returning the raw body.
    pub fn post(&self, sub: &str, body: &serde_json::Value) -> Result<String> {
        self.execute("POST", sub, Vec::new(), Some(serde_json::to_string(body)?))
    }

    /// PUT a JSON body to a sub-path, returning the raw body.
    pub fn put(&self, sub: &str, body: &serde_json::Value) -> Result<String> {
        self.execute("PUT", sub, Vec::new(), Some(serde_json::to_string(body)?))
    }

    fn execute(
        &self,
        method: &str,
        sub: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> Result<String> {
        let request = ApiRequest {
            method: method.to_string(),
            endpoint: self.config.api_url.clone(),
            path: self.path(sub),
            query,
            body,
        };

        let response = self.http.execute(&request, &self.config.authorization())?;

        if response.is_success() {
            Ok(response.body)
        } else {
            let error = serde_json::from_str::<ServerError>(&response.body)
                .unwrap_or_else(|_| ServerError::undecodable(&response.body));
            tracing::warn!(
                status = response.status,
                error_code = %error.error_code,
                path = %request.path,
                "Server rejected request"
            );
            Err(DockhandError::Remote {
                status: response.status,
                error,
            })
        }
    }
}
