//! Fulfillment requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::item::Item;
use super::marketplace::{Contract, Marketplace};
use super::param::Param;

/// A fulfillment request over an asset.
///
/// Polled in `pending` status and driven to a terminal state by exactly one
/// remote transition per processing cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fulfillment {
    pub id: String,

    /// One of: purchase, change, suspend, resume, renew, cancel.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Failing reason, present only on failed requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_key: Option<String>,

    pub asset: Asset,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<Marketplace>,

    #[serde(default)]
    pub params: Vec<Param>,
}

impl Fulfillment {
    /// Get a request parameter by id. `None` if absent.
    pub fn get_param_by_id(&self, id: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.id == id)
    }

    /// Items being provisioned for the first time.
    pub fn new_items(&self) -> Vec<&Item> {
        self.asset
            .items
            .iter()
            .filter(|item| {
                item.quantity.is_positive()
                    && item.old_quantity.map_or(true, |old| old.is_zero())
            })
            .collect()
    }

    /// Items whose provisioned quantity is changing.
    pub fn changed_items(&self) -> Vec<&Item> {
        self.asset
            .items
            .iter()
            .filter(|item| {
                item.quantity.is_positive()
                    && item.old_quantity.is_some_and(|old| !old.is_zero())
            })
            .collect()
    }

    /// Items being removed from the asset.
    pub fn removed_items(&self) -> Vec<&Item> {
        self.asset
            .items
            .iter()
            .filter(|item| item.quantity.is_zero())
            .collect()
    }
}
