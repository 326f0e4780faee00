//! Marketplace, contract and activation references.

use serde::{Deserialize, Serialize};

/// A distribution contract reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A marketplace reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marketplace {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Activation link shown to the customer while a request is inquiring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
