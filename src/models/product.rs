//! Product references.

use serde::{Deserialize, Serialize};

/// Product-level capabilities advertised by the vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspend_resume_supported: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_reseller_information: Option<bool>,
}

/// Reference to a product (application).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<ProductConfiguration>,
}
