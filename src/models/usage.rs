//! Usage files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::company::Company;
use super::marketplace::{Contract, Marketplace};
use super::product::Product;

/// Valid/invalid record counts of a processed usage file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid: Option<i64>,
}

/// A usage file submitted by a vendor for provider review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageFile {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// One of: draft, uploading, uploaded, processing, invalid, ready,
    /// rejected, pending, accepted, closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<Marketplace>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Company>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Company>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_file_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_file_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_note: Option<String>,

    /// Present only when the file was marked invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Records>,
}

impl UsageFile {
    /// The id of the product the file reports usage for, if present.
    pub fn product_id(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.id.as_str())
    }
}
