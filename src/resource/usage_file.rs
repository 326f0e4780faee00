//! Usage file automation.

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::models::UsageFile;
use crate::resource::{automation, parse_list, parse_one, Filters};
use crate::resource::{DispatchOutcome, DispatchRecord, UsageFileAction};

use std::sync::Arc;

/// Resource root for usage files.
pub const RESOURCE: &str = "usage/files";

/// Status polled by default: files ready for provider review.
pub const DEFAULT_STATUS: &str = "ready";

/// User-supplied processing logic for usage files.
///
/// Every polled file must be resolved to a [`UsageFileAction`]; a handler
/// returning `Ok(None)` is reported as an unhandled request.
pub trait UsageFileHandler {
    fn process_request(&mut self, file: &UsageFile) -> Result<Option<UsageFileAction>>;
}

impl<F> UsageFileHandler for F
where
    F: FnMut(&UsageFile) -> Result<Option<UsageFileAction>>,
{
    fn process_request(&mut self, file: &UsageFile) -> Result<Option<UsageFileAction>> {
        self(file)
    }
}

/// Polls ready usage files and drives each through exactly one terminal
/// lifecycle transition per processing cycle.
pub struct UsageFileAutomation<H, F> {
    api: ApiClient<H>,
    handler: F,
}

impl<F: UsageFileHandler> UsageFileAutomation<ReqwestHttpClient, F> {
    /// Create an automation over the production HTTP client.
    pub fn new(config: Config, handler: F) -> Self {
        Self::with_client(ReqwestHttpClient::new(), config, handler)
    }
}

impl<H: HttpClient, F: UsageFileHandler> UsageFileAutomation<H, F> {
    /// Create an automation over an explicit HTTP client implementation.
    pub fn with_client(http: H, config: Config, handler: F) -> Self {
        Self {
            api: ApiClient::new(http, Arc::new(config), RESOURCE),
            handler,
        }
    }

    pub fn config(&self) -> &Config {
        self.api.config()
    }

    /// Fetch a single usage file by id.
    pub fn get(&self, id: &str) -> Result<UsageFile> {
        let body = self.api.get(id, &[])?;
        parse_one("UsageFile", id, &body)
    }

    /// Fetch a filtered collection of usage files.
    pub fn list(&self, filters: Filters) -> Result<Vec<UsageFile>> {
        let filters = filters
            .with_default("status", DEFAULT_STATUS)
            .with_default("limit", self.api.config().limit.to_string());
        tracing::info!(filters = ?filters, "Fetching usage file list");
        let body = self.api.get("", &filters.to_query())?;
        parse_list("UsageFile", &body)
    }

    /// Poll the default-filtered list and dispatch every file in server
    /// order, one at a time.
    #[tracing::instrument(skip(self))]
    pub fn process(&mut self) -> Result<Vec<DispatchRecord>> {
        let files = self.list(Filters::new())?;
        tracing::info!(count = files.len(), "Dispatching usage file batch");
        let Self { api, handler } = self;
        automation::run_batch(&files, |f| f.id.clone(), |file| {
            automation::dispatch_usage_file(api, &file.id, file.product_id(), || {
                handler.process_request(file)
            })
        })
    }

    /// Dispatch a single usage file.
    pub fn dispatch(&mut self, file: &UsageFile) -> Result<DispatchOutcome> {
        let Self { api, handler } = self;
        automation::dispatch_usage_file(api, &file.id, file.product_id(), || {
            handler.process_request(file)
        })
    }

    /// Accept a usage file, optionally with an acceptance note.
    pub fn accept(&self, id: &str, note: Option<&str>) -> Result<String> {
        automation::usage_file_transition(&self.api, id, "accept", "acceptance_note", note)
    }

    /// Close a usage file.
    pub fn close(&self, id: &str) -> Result<String> {
        automation::usage_file_transition(&self.api, id, "close", "", None)
    }

    /// Delete a usage file.
    pub fn delete(&self, id: &str) -> Result<String> {
        automation::usage_file_transition(&self.api, id, "delete", "", None)
    }

    /// Reject a usage file, optionally with a rejection note.
    pub fn reject(&self, id: &str, note: Option<&str>) -> Result<String> {
        automation::usage_file_transition(&self.api, id, "reject", "rejection_note", note)
    }

    /// Submit a usage file for processing.
    pub fn submit(&self, id: &str) -> Result<String> {
        automation::usage_file_transition(&self.api, id, "submit", "", None)
    }
}
