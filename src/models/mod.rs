//! Typed wire models.
//!
//! Every entity here is constructed solely by deserializing a server
//! response; nothing is persisted and instances are discarded after the
//! dispatch cycle that fetched them. Deserialization is strict about shape:
//! a payload that does not fit the declared fields is surfaced as a
//! malformed-response error by the resource layer, never coerced.

pub mod asset;
pub mod company;
pub mod event;
pub mod fulfillment;
pub mod item;
pub mod marketplace;
pub mod param;
pub mod product;
pub mod server_error;
pub mod tier_config;
pub mod usage;

pub use asset::{Asset, Tiers};
pub use company::{Account, Company, Connection, Hub};
pub use event::{EventInfo, Events};
pub use fulfillment::Fulfillment;
pub use item::{Item, Quantity, Renewal};
pub use marketplace::{Activation, Contract, Marketplace};
pub use param::Param;
pub use product::{Product, ProductConfiguration};
pub use server_error::ServerError;
pub use tier_config::{OpenRequest, Template, TierConfig, TierConfigRequest};
pub use usage::{Records, UsageFile};
