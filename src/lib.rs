//! Client SDK for a commerce fulfillment REST API.
//!
//! This crate provides typed models for the API's entities (requests,
//! assets, tier configurations, usage files) and automation dispatchers
//! that poll pending requests, hand each one to user-supplied processing
//! logic, and map the returned decision onto the matching remote state
//! transition (approve, inquire, fail, skip, and the usage-file lifecycle
//! actions).
//!
//! All I/O is synchronous and blocking: a batch run is one sequential pass
//! over the fetched list, with each request fully resolved before the next
//! begins. Periodic polling is the caller's concern.
//!
//! # Example
//! ```no_run
//! use dockhand::{Config, Disposition, FulfillmentAutomation};
//!
//! # fn main() -> dockhand::Result<()> {
//! let config = Config::from_env()?;
//! let handler = |request: &dockhand::Fulfillment| -> dockhand::Result<Option<Disposition>> {
//!     if request.kind == "purchase" {
//!         Ok(Some(Disposition::approve_tile("# Welcome aboard!")))
//!     } else {
//!         Ok(Some(Disposition::Skip))
//!     }
//! };
//! let mut automation = FulfillmentAutomation::new(config, handler);
//! let records = automation.process()?;
//! println!("dispatched {} requests", records.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod resource;

// Re-export commonly used types
pub use client::ApiClient;
pub use config::Config;
pub use error::{DockhandError, Result};
pub use http::{HttpClient, HttpResponse, MockHttpClient, ReqwestHttpClient};
pub use models::{
    Asset, Fulfillment, Item, Param, Product, Quantity, ServerError, TierConfig,
    TierConfigRequest, UsageFile,
};
pub use resource::{
    ApprovalContent, DispatchOutcome, DispatchRecord, Disposition, Filters,
    FulfillmentAutomation, FulfillmentHandler, TierConfigAutomation, TierConfigHandler,
    UsageFileAction, UsageFileAutomation, UsageFileHandler,
};
