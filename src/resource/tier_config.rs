//! Tier configuration request automation.

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::models::{Param, TierConfig, TierConfigRequest};
use crate::resource::{automation, parse_list, parse_one, Filters};
use crate::resource::{DispatchOutcome, DispatchRecord, Disposition};

use std::sync::Arc;

/// Resource root for tier configuration requests.
pub const RESOURCE: &str = "tier/config-requests";

/// Status polled by default.
pub const DEFAULT_STATUS: &str = "pending";

/// User-supplied processing logic for tier configuration requests.
///
/// Same contract as
/// [`FulfillmentHandler`](crate::resource::FulfillmentHandler).
pub trait TierConfigHandler {
    fn process_request(&mut self, request: &TierConfigRequest) -> Result<Option<Disposition>>;
}

impl<F> TierConfigHandler for F
where
    F: FnMut(&TierConfigRequest) -> Result<Option<Disposition>>,
{
    fn process_request(&mut self, request: &TierConfigRequest) -> Result<Option<Disposition>> {
        self(request)
    }
}

/// Polls pending tier configuration requests and drives each through
/// exactly one terminal transition per processing cycle.
pub struct TierConfigAutomation<H, F> {
    api: ApiClient<H>,
    handler: F,
}

impl<F: TierConfigHandler> TierConfigAutomation<ReqwestHttpClient, F> {
    /// Create an automation over the production HTTP client.
    pub fn new(config: Config, handler: F) -> Self {
        Self::with_client(ReqwestHttpClient::new(), config, handler)
    }
}

impl<H: HttpClient, F: TierConfigHandler> TierConfigAutomation<H, F> {
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

    /// Fetch a single request by id.
    pub fn get(&self, id: &str) -> Result<TierConfigRequest> {
        let body = self.api.get(id, &[])?;
        parse_one("TierConfigRequest", id, &body)
    }

    /// Fetch a filtered collection of requests.
    pub fn list(&self, filters: Filters) -> Result<Vec<TierConfigRequest>> {
        let filters = filters
            .with_default("status", DEFAULT_STATUS)
            .with_default("limit", self.api.config().limit.to_string());
        tracing::info!(filters = ?filters, "Fetching tier config request list");
        let body = self.api.get("", &filters.to_query())?;
        parse_list("TierConfigRequest", &body)
    }

    /// Poll the default-filtered list and dispatch every request in server
    /// order, one at a time.
    #[tracing::instrument(skip(self))]
    pub fn process(&mut self) -> Result<Vec<DispatchRecord>> {
        let requests = self.list(Filters::new())?;
        tracing::info!(count = requests.len(), "Dispatching tier config batch");
        let Self { api, handler } = self;
        automation::run_batch(&requests, |r| r.id.clone(), |request| {
            automation::dispatch_request(
                api,
                &request.id,
                Some(&request.configuration.product.id),
                || handler.process_request(request),
            )
        })
    }

    /// Dispatch a single request.
    pub fn dispatch(&mut self, request: &TierConfigRequest) -> Result<DispatchOutcome> {
        let Self { api, handler } = self;
        automation::dispatch_request(
            api,
            &request.id,
            Some(&request.configuration.product.id),
            || handler.process_request(request),
        )
    }

    /// Approve a request by id with an explicit transition body.
    pub fn approve(&self, id: &str, body: &serde_json::Value) -> Result<String> {
        automation::approve(&self.api, id, body)
    }

    /// Move a request to inquiring.
    pub fn inquire(&self, id: &str) -> Result<String> {
        automation::inquire(&self.api, id)
    }

    /// Fail a request with a reason.
    pub fn fail(&self, id: &str, reason: &str) -> Result<String> {
        automation::fail(&self.api, id, reason)
    }

    /// Update request parameters in place.
    pub fn update_parameters(&self, id: &str, params: &[Param]) -> Result<String> {
        automation::update_parameters(&self.api, id, params)
    }

    /// Render a pre-defined activation template for a request.
    pub fn render_template(&self, template_id: &str, request_id: &str) -> Result<String> {
        automation::render_template(&self.api, template_id, request_id)
    }

    /// Look up the approved tier configuration of an account for a product.
    pub fn get_tier_config(&self, tier_id: &str, product_id: &str) -> Result<Option<TierConfig>> {
        let filters = Filters::new()
            .status("approved")
            .set("configuration__product__id", product_id)
            .set("configuration__account__id", tier_id);
        let body = self.api.get("", &filters.to_query())?;
        let requests: Vec<TierConfigRequest> = parse_list("TierConfigRequest", &body)?;
        Ok(requests.into_iter().next().map(|r| r.configuration))
    }
}
