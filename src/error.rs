//! Error types for the SDK.

use thiserror::Error;

use crate::models::ServerError;

/// Result type alias using the dockhand error type.
pub type Result<T> = std::result::Result<T, DockhandError>;

/// Main error type for the SDK.
#[derive(Error, Debug)]
pub enum DockhandError {
    /// No request with the given id exists on the server
    #[error("Request not found: {0}")]
    NotFound(String),

    /// Server payload does not fit the declared entity shape
    #[error("Invalid structure for `{entity}`: {error}")]
    MalformedResponse {
        entity: &'static str,
        error: String,
    },

    /// Server signalled a non-success status on a read or mutating call
    #[error("Server returned status {status}: {error}")]
    Remote { status: u16, error: ServerError },

    /// A handler finished without resolving the request to a terminal action
    #[error("Request {0} was not resolved to a terminal action")]
    UnhandledRequest(String),

    /// A handler failed while processing a request
    #[error("Processing of request {request_id} failed: {source}")]
    Process {
        request_id: String,
        #[source]
        source: Box<DockhandError>,
    },

    /// HTTP client error
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DockhandError {
    /// Whether this error should stop a batch run.
    ///
    /// Handler-level failures are confined to the request that produced them;
    /// infrastructure failures (transport, remote rejection, poison payloads)
    /// propagate to the caller of the batch.
    pub fn halts_batch(&self) -> bool {
        !matches!(
            self,
            DockhandError::UnhandledRequest(_) | DockhandError::Process { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_failures_do_not_halt_the_batch() {
        let unhandled = DockhandError::UnhandledRequest("PR-0000".to_string());
        assert!(!unhandled.halts_batch());

        let process = DockhandError::Process {
            request_id: "PR-0000".to_string(),
            source: Box::new(DockhandError::Other(anyhow::anyhow!("boom"))),
        };
        assert!(!process.halts_batch());
    }

    #[test]
    fn infrastructure_failures_halt_the_batch() {
        let remote = DockhandError::Remote {
            status: 500,
            error: ServerError::default(),
        };
        assert!(remote.halts_batch());

        let malformed = DockhandError::MalformedResponse {
            entity: "Fulfillment",
            error: "missing field `id`".to_string(),
        };
        assert!(malformed.halts_batch());
    }
}
