//! Lifecycle events recorded on requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::company::Company;

/// The date and user that caused an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<Company>,
}

/// The set of lifecycle transitions recorded on an object.
///
/// Each field is present only if the corresponding transition occurred.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Events {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<EventInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquired: Option<EventInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pended: Option<EventInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated: Option<EventInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<EventInfo>,
}
