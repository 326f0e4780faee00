//! Fulfillment request automation.

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::models::{Fulfillment, Param, TierConfig, TierConfigRequest};
use crate::resource::{automation, parse_list, parse_one, Filters};
use crate::resource::{DispatchOutcome, DispatchRecord, Disposition};

use std::sync::Arc;

/// Resource root for fulfillment requests.
pub const RESOURCE: &str = "requests";

/// Status polled by default.
pub const DEFAULT_STATUS: &str = "pending";

/// User-supplied processing logic for fulfillment requests.
///
/// This is the sole extension point: all domain logic lives in the handler,
/// outside the dispatch core. Return `Ok(Some(..))` with the terminal
/// [`Disposition`] for the request, or `Err` to record the request as
/// failed-to-process without aborting the batch. Returning `Ok(None)` means
/// the handler finished without deciding, which the dispatcher treats as an
/// integration bug.
pub trait FulfillmentHandler {
    fn process_request(&mut self, request: &Fulfillment) -> Result<Option<Disposition>>;
}

impl<F> FulfillmentHandler for F
where
    F: FnMut(&Fulfillment) -> Result<Option<Disposition>>,
{
    fn process_request(&mut self, request: &Fulfillment) -> Result<Option<Disposition>> {
        self(request)
    }
}

/// Polls pending fulfillment requests and drives each through exactly one
/// terminal transition per processing cycle.
pub struct FulfillmentAutomation<H, F> {
    api: ApiClient<H>,
    handler: F,
}

impl<F: FulfillmentHandler> FulfillmentAutomation<ReqwestHttpClient, F> {
    /// Create an automation over the production HTTP client.
    pub fn new(config: Config, handler: F) -> Self {
        Self::with_client(ReqwestHttpClient::new(), config, handler)
    }
}

impl<H: HttpClient, F: FulfillmentHandler> FulfillmentAutomation<H, F> {
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
    pub fn get(&self, id: &str) -> Result<Fulfillment> {
        let body = self.api.get(id, &[])?;
        parse_one("Fulfillment", id, &body)
    }

    /// Fetch a filtered collection of requests.
    ///
    /// Unspecified filters default to `status=pending` and the configured
    /// page size, so only actionable requests come back.
    pub fn list(&self, filters: Filters) -> Result<Vec<Fulfillment>> {
        let filters = filters
            .with_default("status", DEFAULT_STATUS)
            .with_default("limit", self.api.config().limit.to_string());
        tracing::info!(filters = ?filters, "Fetching fulfillment request list");
        let body = self.api.get("", &filters.to_query())?;
        parse_list("Fulfillment", &body)
    }

    /// Poll the default-filtered list and dispatch every request in server
    /// order, one at a time.
    #[tracing::instrument(skip(self))]
    pub fn process(&mut self) -> Result<Vec<DispatchRecord>> {
        let requests = self.list(Filters::new())?;
        tracing::info!(count = requests.len(), "Dispatching fulfillment batch");
        let Self { api, handler } = self;
        automation::run_batch(&requests, |r| r.id.clone(), |request| {
            automation::dispatch_request(api, &request.id, Some(&request.asset.product.id), || {
                handler.process_request(request)
            })
        })
    }

    /// Dispatch a single request through the allow-list filter, the handler
    /// and the resulting remote transition.
    pub fn dispatch(&mut self, request: &Fulfillment) -> Result<DispatchOutcome> {
        let Self { api, handler } = self;
        automation::dispatch_request(api, &request.id, Some(&request.asset.product.id), || {
            handler.process_request(request)
        })
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
    ///
    /// `None` when the account has no approved configuration.
    pub fn get_tier_config(&self, tier_id: &str, product_id: &str) -> Result<Option<TierConfig>> {
        let api = self.api.with_base(crate::resource::tier_config::RESOURCE);
        let filters = Filters::new()
            .status("approved")
            .set("configuration__product__id", product_id)
            .set("configuration__account__id", tier_id);
        let body = api.get("", &filters.to_query())?;
        let requests: Vec<TierConfigRequest> = parse_list("TierConfigRequest", &body)?;
        Ok(requests.into_iter().next().map(|r| r.configuration))
    }
}
