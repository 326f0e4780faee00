//! The dispatch core shared by the automation resources.
//!
//! Request-processing handlers communicate their decision through
//! discriminated outcome values ([`Disposition`] for fulfillment and
//! tier-config requests, [`UsageFileAction`] for usage files). The
//! dispatcher performs an exhaustive case analysis over the returned value
//! and issues the corresponding remote transition calls. A handler that
//! completes without deciding (`Ok(None)`) is a programming error and is
//! surfaced as [`DockhandError::UnhandledRequest`].
//!
//! Each polled request reaches exactly one terminal transition per cycle:
//!
//! ```text
//! Approve(Tile|Template) ──> POST {id}/approve/
//! Approve(None)          ──> no call, reported as NoContent
//! Inquire(params)        ──> PUT {id} {"params": […]}, then POST {id}/inquire/
//! Fail(reason)           ──> POST {id}/fail/ {"reason": …}
//! Skip                   ──> no call
//! Accept/Close/Delete/
//! Reject/Submit          ──> POST {id}/{action}/
//! ```
//!
//! There is no rollback: if the param update of an inquire lands but the
//! inquire call itself fails, the update stays applied.

use serde_json::json;

use crate::client::ApiClient;
use crate::error::{DockhandError, Result};
use crate::http::HttpClient;
use crate::models::Param;

/// Rendered approval content.
///
/// Two alternate mechanisms produce human-readable activation content: an
/// inline markdown tile, or a reference to a pre-defined template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalContent {
    /// Inline tile text, sent as `{"template": {"representation": …}}`.
    Tile(String),
    /// Template reference, sent as `{"template": {"id": …}}`.
    Template(String),
}

impl ApprovalContent {
    /// The approve-transition body for this content.
    pub fn body(&self) -> serde_json::Value {
        match self {
            ApprovalContent::Tile(text) => json!({"template": {"representation": text}}),
            ApprovalContent::Template(id) => json!({"template": {"id": id}}),
        }
    }
}

/// Terminal decision for a fulfillment or tier-config request.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// Approve the request. Without content, no remote call is issued and
    /// the request is reported as producing no result.
    Approve(Option<ApprovalContent>),
    /// Push the given params back to the server for human correction, then
    /// move the request to inquiring.
    Inquire(Vec<Param>),
    /// Fail the request with a reason shown to the requester.
    Fail(String),
    /// Leave the request untouched.
    Skip,
}

impl Disposition {
    /// Approve with inline tile content.
    pub fn approve_tile(text: impl Into<String>) -> Self {
        Disposition::Approve(Some(ApprovalContent::Tile(text.into())))
    }

    /// Approve with a template reference.
    pub fn approve_template(id: impl Into<String>) -> Self {
        Disposition::Approve(Some(ApprovalContent::Template(id.into())))
    }
}

/// Terminal decision for a usage file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageFileAction {
    /// Accept the file, optionally with an acceptance note.
    Accept { note: Option<String> },
    /// Close the file.
    Close,
    /// Delete the file.
    Delete,
    /// Reject the file, optionally with a rejection note.
    Reject { note: Option<String> },
    /// Submit the file for processing.
    Submit,
    /// Leave the file untouched.
    Skip,
}

impl UsageFileAction {
    pub fn accept(note: impl Into<String>) -> Self {
        UsageFileAction::Accept {
            note: Some(note.into()),
        }
    }

    pub fn reject(note: impl Into<String>) -> Self {
        UsageFileAction::Reject {
            note: Some(note.into()),
        }
    }
}

/// How a single request left the dispatch step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Approve transition issued.
    Approved,
    /// Approve was signalled without content; nothing was sent.
    NoContent,
    /// Params updated and inquire transition issued.
    Inquired,
    /// Fail transition issued.
    Failed,
    /// Handler chose to leave the request untouched.
    Skipped,
    /// Request's product is outside the configured allow-list.
    SkippedByFilter,
    /// Usage-file accept transition issued.
    Accepted,
    /// Usage-file close transition issued.
    Closed,
    /// Usage-file delete transition issued.
    Deleted,
    /// Usage-file reject transition issued.
    Rejected,
    /// Usage-file submit transition issued.
    Submitted,
    /// The handler failed or did not decide; the batch went on without
    /// touching this request.
    Errored(String),
}

/// Per-request result of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRecord {
    pub request_id: String,
    pub outcome: DispatchOutcome,
}

// ============================================================================
// Remote transitions
// ============================================================================

pub(crate) fn approve<H: HttpClient>(
    api: &ApiClient<H>,
    id: &str,
    body: &serde_json::Value,
) -> Result<String> {
    api.post(&format!("{}/approve/", id), body)
}

pub(crate) fn inquire<H: HttpClient>(api: &ApiClient<H>, id: &str) -> Result<String> {
    api.post(&format!("{}/inquire/", id), &json!({}))
}

pub(crate) fn fail<H: HttpClient>(api: &ApiClient<H>, id: &str, reason: &str) -> Result<String> {
    api.post(&format!("{}/fail/", id), &json!({ "reason": reason }))
}

pub(crate) fn update_parameters<H: HttpClient>(
    api: &ApiClient<H>,
    id: &str,
    params: &[Param],
) -> Result<String> {
    api.put(id, &json!({ "params": params }))
}

pub(crate) fn usage_file_transition<H: HttpClient>(
    api: &ApiClient<H>,
    id: &str,
    action: &str,
    note_key: &str,
    note: Option<&str>,
) -> Result<String> {
    let body = match note {
        Some(note) => json!({ note_key: note }),
        None => json!({}),
    };
    api.post(&format!("{}/{}/", id, action), &body)
}

pub(crate) fn render_template<H: HttpClient>(
    api: &ApiClient<H>,
    template_id: &str,
    request_id: &str,
) -> Result<String> {
    api.with_base("templates").get(
        &format!("{}/render", template_id),
        &[("request_id".to_string(), request_id.to_string())],
    )
}

// ============================================================================
// Dispatch
// ============================================================================

/// Run the allow-list pre-filter, the handler, and the resulting remote
/// transition for one fulfillment or tier-config request.
pub(crate) fn dispatch_request<H, F>(
    api: &ApiClient<H>,
    request_id: &str,
    product_id: Option<&str>,
    process: F,
) -> Result<DispatchOutcome>
where
    H: HttpClient,
    F: FnOnce() -> Result<Option<Disposition>>,
{
    if skipped_by_filter(api, request_id, product_id) {
        return Ok(DispatchOutcome::SkippedByFilter);
    }

    tracing::info!(request_id = %request_id, "Processing request");

    match run_handler(request_id, process)? {
        Disposition::Approve(Some(content)) => {
            approve(api, request_id, &content.body())?;
            Ok(DispatchOutcome::Approved)
        }
        Disposition::Approve(None) => {
            tracing::info!(request_id = %request_id, "Handler produced no activation content");
            Ok(DispatchOutcome::NoContent)
        }
        Disposition::Inquire(params) => {
            update_parameters(api, request_id, &params)?;
            inquire(api, request_id)?;
            Ok(DispatchOutcome::Inquired)
        }
        Disposition::Fail(reason) => {
            fail(api, request_id, &reason)?;
            Ok(DispatchOutcome::Failed)
        }
        Disposition::Skip => {
            tracing::debug!(request_id = %request_id, "Request skipped by handler");
            Ok(DispatchOutcome::Skipped)
        }
    }
}

/// Usage-file counterpart of [`dispatch_request`].
pub(crate) fn dispatch_usage_file<H, F>(
    api: &ApiClient<H>,
    file_id: &str,
    product_id: Option<&str>,
    process: F,
) -> Result<DispatchOutcome>
where
    H: HttpClient,
    F: FnOnce() -> Result<Option<UsageFileAction>>,
{
    if skipped_by_filter(api, file_id, product_id) {
        return Ok(DispatchOutcome::SkippedByFilter);
    }

    tracing::info!(file_id = %file_id, "Processing usage file");

    let (action, note_key, note, outcome) = match run_handler(file_id, process)? {
        UsageFileAction::Accept { note } => {
            ("accept", "acceptance_note", note, DispatchOutcome::Accepted)
        }
        UsageFileAction::Close => ("close", "", None, DispatchOutcome::Closed),
        UsageFileAction::Delete => ("delete", "", None, DispatchOutcome::Deleted),
        UsageFileAction::Reject { note } => {
            ("reject", "rejection_note", note, DispatchOutcome::Rejected)
        }
        UsageFileAction::Submit => ("submit", "", None, DispatchOutcome::Submitted),
        UsageFileAction::Skip => {
            tracing::debug!(file_id = %file_id, "Usage file skipped by handler");
            return Ok(DispatchOutcome::Skipped);
        }
    };

    usage_file_transition(api, file_id, action, note_key, note.as_deref())?;
    Ok(outcome)
}

fn skipped_by_filter<H: HttpClient>(
    api: &ApiClient<H>,
    request_id: &str,
    product_id: Option<&str>,
) -> bool {
    if let Some(product_id) = product_id {
        if !api.config().allows_product(product_id) {
            tracing::info!(
                request_id = %request_id,
                product_id = %product_id,
                "Product not in allow-list, skipping request"
            );
            return true;
        }
    }
    false
}

fn run_handler<T, F>(request_id: &str, process: F) -> Result<T>
where
    F: FnOnce() -> Result<Option<T>>,
{
    match process() {
        Ok(Some(signal)) => Ok(signal),
        Ok(None) => Err(DockhandError::UnhandledRequest(request_id.to_string())),
        Err(source) => Err(DockhandError::Process {
            request_id: request_id.to_string(),
            source: Box::new(source),
        }),
    }
}

/// Drive a fetched batch through dispatch, one request at a time in server
/// order.
///
/// Handler failures are logged and recorded as [`DispatchOutcome::Errored`];
/// the batch continues. Infrastructure failures halt the batch and
/// propagate.
pub(crate) fn run_batch<R, I, D>(
    requests: &[R],
    mut id_of: I,
    mut dispatch: D,
) -> Result<Vec<DispatchRecord>>
where
    I: FnMut(&R) -> String,
    D: FnMut(&R) -> Result<DispatchOutcome>,
{
    let mut records = Vec::with_capacity(requests.len());
    for request in requests {
        let request_id = id_of(request);
        match dispatch(request) {
            Ok(outcome) => {
                tracing::debug!(request_id = %request_id, outcome = ?outcome, "Request dispatched");
                records.push(DispatchRecord {
                    request_id,
                    outcome,
                });
            }
            Err(error) if error.halts_batch() => return Err(error),
            Err(error) => {
                tracing::error!(request_id = %request_id, error = %error, "Request processing failed");
                records.push(DispatchRecord {
                    request_id,
                    outcome: DispatchOutcome::Errored(error.to_string()),
                });
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_content_wraps_as_representation() {
        let body = ApprovalContent::Tile("Hello".to_string()).body();
        assert_eq!(body, json!({"template": {"representation": "Hello"}}));
    }

    #[test]
    fn template_content_wraps_as_id() {
        let body = ApprovalContent::Template("TL-497-535-242".to_string()).body();
        assert_eq!(body, json!({"template": {"id": "TL-497-535-242"}}));
    }

    #[test]
    fn undecided_handlers_surface_unhandled_request() {
        let err = run_handler::<Disposition, _>("PR-0000", || Ok(None)).unwrap_err();
        assert!(matches!(err, DockhandError::UnhandledRequest(id) if id == "PR-0000"));
    }

    #[test]
    fn handler_errors_are_wrapped_with_the_request_id() {
        let err = run_handler::<Disposition, _>("PR-0000", || {
            Err(DockhandError::Other(anyhow::anyhow!("boom")))
        })
        .unwrap_err();
        match err {
            DockhandError::Process { request_id, .. } => assert_eq!(request_id, "PR-0000"),
            other => panic!("expected Process error, got {:?}", other),
        }
    }
}
