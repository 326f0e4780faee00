//! Assets: the provisioned subscription a fulfillment request acts on.

use serde::{Deserialize, Serialize};

use super::company::{Account, Connection};
use super::item::Item;
use super::param::Param;
use super::product::Product;

/// The tier account chain above an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tiers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Account>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier1: Option<Account>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier2: Option<Account>,
}

/// A provisioned subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_uid: Option<String>,

    pub product: Product,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<Connection>,

    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default)]
    pub params: Vec<Param>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Tiers>,
}

impl Asset {
    /// Get a parameter by id.
    ///
    /// Absence is a normal outcome and returns `None`; the first match wins
    /// if the server ever sends duplicate ids.
    pub fn get_param_by_id(&self, id: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.id == id)
    }

    /// Get an item by manufacturer part number.
    pub fn get_item_by_mpn(&self, mpn: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.mpn == mpn)
    }

    /// Get an item by its global id.
    pub fn get_item_by_global_id(&self, global_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.global_id == global_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quantity;

    fn asset() -> Asset {
        serde_json::from_str(
            r#"{
                "id": "AS-000-000-000",
                "status": "active",
                "external_id": "123",
                "product": {"id": "PRD-000-000-000", "name": "Product"},
                "items": [
                    {"mpn": "TEAM-ST3L2T1Y", "global_id": "ITM-1", "quantity": "100"},
                    {"mpn": "TEAM-ST3L2T1YA", "global_id": "ITM-2", "quantity": "unlimited"}
                ],
                "params": [
                    {"id": "howyoufeel", "value": "great"},
                    {"id": "email", "value": ""}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn get_param_by_id_finds_present_params() {
        let asset = asset();
        let param = asset.get_param_by_id("howyoufeel").unwrap();
        assert_eq!(param.id, "howyoufeel");
        assert_eq!(param.value.as_deref(), Some("great"));
    }

    #[test]
    fn get_param_by_id_returns_none_for_absent_ids() {
        assert!(asset().get_param_by_id("invalid-id").is_none());
    }

    #[test]
    fn get_item_by_mpn_finds_present_items() {
        let asset = asset();
        let item = asset.get_item_by_mpn("TEAM-ST3L2T1Y").unwrap();
        assert_eq!(item.quantity, Quantity::Count(100));
        assert!(asset.get_item_by_mpn("invalid-mpn").is_none());
    }

    #[test]
    fn get_item_by_global_id_finds_present_items() {
        let asset = asset();
        let item = asset.get_item_by_global_id("ITM-2").unwrap();
        assert!(item.quantity.is_unlimited());
    }
}
