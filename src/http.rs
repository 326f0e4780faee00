//! HTTP client abstraction for making requests.
//!
//! This module defines the `HttpClient` trait to abstract HTTP request
//! execution, enabling testability with mock implementations. All I/O is
//! synchronous and blocking; one call is fully resolved before the next.

use crate::error::Result;

/// A fully described API call.
///
/// The `endpoint` is the API base URL and `path` is everything after it
/// (resource root, id, transition suffix). Keeping them separate lets tests
/// match on the path alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method (e.g. "POST", "GET")
    pub method: String,
    /// The base URL of the API (e.g. <https://api.example.com/public/v1/>)
    pub endpoint: String,
    /// The path portion relative to the endpoint (e.g. "requests/PR-000/approve/")
    pub path: String,
    /// Query string pairs, already ordered
    pub query: Vec<(String, String)>,
    /// The request body as a JSON string, if any
    pub body: Option<String>,
}

/// Response from an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as a string
    pub body: String,
}

impl HttpResponse {
    /// Whether the status code signals success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for executing HTTP requests.
///
/// This abstraction allows for different implementations (production vs.
/// testing) and makes the dispatch logic testable without making real HTTP
/// calls.
pub trait HttpClient: Send + Sync + Clone {
    /// Execute an HTTP request.
    ///
    /// # Errors
    /// Returns an error if the request fails at the transport level (network
    /// issues, invalid URL). Non-success HTTP statuses are NOT errors here;
    /// they are returned as a plain [`HttpResponse`] for the caller to decode.
    fn execute(&self, request: &ApiRequest, api_key: &str) -> Result<HttpResponse>;
}

fn join_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production HTTP client using reqwest's blocking API.
///
/// This implementation makes real HTTP requests to the remote API.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    /// Create a new reqwest-based HTTP client.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self, request, api_key), fields(method = %request.method, path = %request.path))]
    fn execute(&self, request: &ApiRequest, api_key: &str) -> Result<HttpResponse> {
        let url = join_url(&request.endpoint, &request.path);

        tracing::debug!(url = %url, "Executing HTTP request");

        let method: reqwest::Method = request.method.parse().map_err(|e| {
            tracing::error!(method = %request.method, error = %e, "Invalid HTTP method");
            anyhow::anyhow!("Invalid HTTP method '{}': {}", request.method, e)
        })?;

        let mut req = self.client.request(method, &url);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        // Only add Authorization header if api_key is not empty
        if !api_key.is_empty() {
            req = req.header("Authorization", api_key);
        }

        // Only add body and Content-Type for methods that support a body
        let method_upper = request.method.to_uppercase();
        if method_upper != "GET" && method_upper != "HEAD" {
            if let Some(body) = &request.body {
                req = req
                    .header("Content-Type", "application/json")
                    .body(body.clone());
                tracing::trace!(body_len = body.len(), "Added request body");
            }
        }

        let response = req.send().map_err(|e| {
            tracing::error!(url = %url, error = %e, "HTTP request failed");
            e
        })?;

        let status = response.status().as_u16();
        let body = response.text()?;

        tracing::debug!(
            status = status,
            response_len = body.len(),
            "HTTP request completed"
        );

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock HTTP client for testing.
///
/// Allows configuring predetermined responses for specific requests without
/// making actual HTTP calls.
///
/// # Example
/// ```
/// use dockhand::http::{HttpResponse, MockHttpClient};
///
/// let mock = MockHttpClient::new();
/// mock.add_response(
///     "GET requests",
///     Ok(HttpResponse {
///         status: 200,
///         body: "[]".to_string(),
///     }),
/// );
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, Vec<Result<HttpResponse>>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// Record of a call made to the mock HTTP client.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub method: String,
    pub endpoint: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    pub api_key: String,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predetermined response for a specific method and path.
    ///
    /// The key is formatted as "{method} {path}". Multiple responses can be
    /// added for the same key - they will be returned in FIFO order.
    pub fn add_response(&self, key: &str, response: Result<HttpResponse>) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(response);
    }

    /// Shorthand for a successful 200 response with the given body.
    pub fn add_ok(&self, key: &str, body: &str) {
        self.add_response(
            key,
            Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            }),
        );
    }

    /// Get all calls that have been made to this mock client.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Clear all recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl HttpClient for MockHttpClient {
    fn execute(&self, request: &ApiRequest, api_key: &str) -> Result<HttpResponse> {
        // Record this call
        self.calls.lock().push(MockCall {
            method: request.method.clone(),
            endpoint: request.endpoint.clone(),
            path: request.path.clone(),
            query: request.query.clone(),
            body: request.body.clone(),
            api_key: api_key.to_string(),
        });

        // Look up the response
        let key = format!("{} {}", request.method, request.path);
        let mock_response = {
            let mut responses = self.responses.lock();
            match responses.get_mut(&key) {
                Some(queue) if !queue.is_empty() => Some(queue.remove(0)),
                _ => None,
            }
        };

        match mock_response {
            Some(response) => response,
            None => Err(crate::error::DockhandError::Other(anyhow::anyhow!(
                "No mock response configured for {} {}",
                request.method,
                request.path
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, path: &str) -> ApiRequest {
        ApiRequest {
            method: method.to_string(),
            endpoint: "https://api.example.com/public/v1/".to_string(),
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://api.example.com/public/v1/", "requests/PR-000"),
            "https://api.example.com/public/v1/requests/PR-000"
        );
        assert_eq!(
            join_url("https://api.example.com/public/v1", "requests/PR-000/approve/"),
            "https://api.example.com/public/v1/requests/PR-000/approve/"
        );
    }

    #[test]
    fn test_mock_client_basic() {
        let mock = MockHttpClient::new();
        mock.add_ok("POST requests/PR-000/approve/", "success");

        let response = mock
            .execute(&request("POST", "requests/PR-000/approve/"), "ApiKey key")
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "success");

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, "requests/PR-000/approve/");
        assert_eq!(calls[0].api_key, "ApiKey key");
    }

    #[test]
    fn test_mock_client_multiple_responses() {
        let mock = MockHttpClient::new();
        mock.add_ok("GET requests", "first");
        mock.add_ok("GET requests", "second");

        let response1 = mock.execute(&request("GET", "requests"), "key").unwrap();
        assert_eq!(response1.body, "first");

        let response2 = mock.execute(&request("GET", "requests"), "key").unwrap();
        assert_eq!(response2.body, "second");

        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn test_mock_client_no_response() {
        let mock = MockHttpClient::new();
        let result = mock.execute(&request("POST", "requests/unknown"), "key");
        assert!(result.is_err());
    }
}
