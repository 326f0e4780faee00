//! Error payload returned by the server on non-success statuses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured error body decoded from a non-success response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerError {
    #[serde(default)]
    pub error_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,

    #[serde(default)]
    pub errors: Vec<String>,
}

impl ServerError {
    /// Placeholder used when an error body cannot be decoded.
    pub fn undecodable(body: &str) -> Self {
        ServerError {
            error_code: "unknown".to_string(),
            params: None,
            errors: vec![body.to_string()],
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.error_code, self.errors.join("; "))
    }
}
