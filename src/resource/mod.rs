//! Resource fetch primitives and the automation dispatchers.
//!
//! Fetching is strict: a payload that does not map onto the declared entity
//! shape is a [`DockhandError::MalformedResponse`], distinguishable from
//! transport failures so callers can log poison-response conditions
//! separately.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::error::{DockhandError, Result};

pub mod automation;
pub mod fulfillment;
pub mod tier_config;
pub mod usage_file;

pub use automation::{
    ApprovalContent, DispatchOutcome, DispatchRecord, Disposition, UsageFileAction,
};
pub use fulfillment::{FulfillmentAutomation, FulfillmentHandler};
pub use tier_config::{TierConfigAutomation, TierConfigHandler};
pub use usage_file::{UsageFileAutomation, UsageFileHandler};

/// An ordered set of list filters.
///
/// Keys are kept sorted so identical filter sets always produce identical
/// query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(BTreeMap<String, String>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter, replacing any previous value for the key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Filter on request status.
    pub fn status(self, status: impl Into<String>) -> Self {
        self.set("status", status)
    }

    /// Bound the number of returned results.
    pub fn limit(self, limit: usize) -> Self {
        self.set("limit", limit.to_string())
    }

    /// Set a filter only if the key is not already present.
    pub(crate) fn with_default(self, key: &str, value: impl Into<String>) -> Self {
        if self.0.contains_key(key) {
            self
        } else {
            self.set(key, value)
        }
    }

    /// The filters as query-string pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Deserialize a list payload strictly.
pub(crate) fn parse_list<T: DeserializeOwned>(entity: &'static str, body: &str) -> Result<Vec<T>> {
    serde_json::from_str(body).map_err(|e| DockhandError::MalformedResponse {
        entity,
        error: e.to_string(),
    })
}

/// Deserialize a fetch-by-id payload strictly.
///
/// The server answers some by-id fetches with a bare object and others with
/// a one-element list; both shapes are accepted. An empty list means the id
/// does not exist.
pub(crate) fn parse_one<T: DeserializeOwned>(
    entity: &'static str,
    id: &str,
    body: &str,
) -> Result<T> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| DockhandError::MalformedResponse {
            entity,
            error: e.to_string(),
        })?;

    let object = if value.is_array() {
        let mut items: Vec<serde_json::Value> =
            serde_json::from_value(value).map_err(|e| DockhandError::MalformedResponse {
                entity,
                error: e.to_string(),
            })?;
        if items.is_empty() {
            return Err(DockhandError::NotFound(id.to_string()));
        }
        items.remove(0)
    } else {
        value
    };

    serde_json::from_value(object).map_err(|e| DockhandError::MalformedResponse {
        entity,
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Param;

    #[test]
    fn filters_produce_sorted_queries() {
        let filters = Filters::new()
            .limit(10)
            .status("pending")
            .set("asset.product.id", "PRD-000");

        assert_eq!(
            filters.to_query(),
            vec![
                ("asset.product.id".to_string(), "PRD-000".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("status".to_string(), "pending".to_string()),
            ]
        );
    }

    #[test]
    fn with_default_does_not_override_explicit_values() {
        let filters = Filters::new().status("approved").with_default("status", "pending");
        assert_eq!(
            filters.to_query(),
            vec![("status".to_string(), "approved".to_string())]
        );
    }

    #[test]
    fn parse_one_accepts_single_objects_and_lists() {
        let from_object: Param = parse_one("Param", "p", r#"{"id": "p"}"#).unwrap();
        assert_eq!(from_object.id, "p");

        let from_list: Param = parse_one("Param", "p", r#"[{"id": "p"}]"#).unwrap();
        assert_eq!(from_list.id, "p");
    }

    #[test]
    fn parse_one_reports_missing_ids() {
        let err = parse_one::<Param>("Param", "missing", "[]").unwrap_err();
        assert!(matches!(err, DockhandError::NotFound(id) if id == "missing"));
    }

    #[test]
    fn parse_list_flags_malformed_payloads() {
        let err = parse_list::<Param>("Param", r#"{"not": "a list"}"#).unwrap_err();
        assert!(matches!(
            err,
            DockhandError::MalformedResponse { entity: "Param", .. }
        ));
    }
}
