//! Tier configurations and tier configuration requests.

use serde::{Deserialize, Serialize};

use super::company::{Account, Company, Connection};
use super::event::Events;
use super::marketplace::Activation;
use super::param::Param;
use super::product::Product;

/// An approval template attached to a tier configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<String>,
}

/// Reference to the currently open request on a configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenRequest {
    pub id: String,
}

/// Full representation of a tier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub account: Account,

    pub product: Product,

    /// Tier level for the product from the customer's perspective.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_level: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<Connection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Events>,

    /// Parameter data, extended with unfilled parameters from the product.
    #[serde(default)]
    pub params: Vec<Param>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_request: Option<OpenRequest>,
}

impl TierConfig {
    /// Get a configuration parameter by id. `None` if absent.
    pub fn get_param_by_id(&self, id: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.id == id)
    }
}

/// A request to set up or update a tier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfigRequest {
    pub id: String,

    /// One of: setup, update.
    #[serde(rename = "type")]
    pub kind: String,

    /// One of: tiers_setup, pending, inquiring, approved, failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    pub configuration: TierConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Events>,

    /// Parameter data; modifiable only while the request is pending.
    #[serde(default)]
    pub params: Vec<Param>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Company>,

    /// Filled only once the request is approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,

    /// Filled only once the request is failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<Activation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TierConfigRequest {
    /// Get a request parameter by id. `None` if absent.
    pub fn get_param_by_id(&self, id: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.id == id)
    }
}
