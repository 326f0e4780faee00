//! Request parameters.

use serde::{Deserialize, Serialize};

/// A single configuration parameter attached to a request.
///
/// A set `value_error` marks the parameter as needing human correction; it
/// is what an inquire transition sends back to the server so the reviewer
/// can see which fields to fix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_error: Option<String>,
}

impl Param {
    /// A parameter carrying only an id and an error message, as sent back
    /// to the server by an inquire transition.
    pub fn with_error(id: impl Into<String>, value_error: impl Into<String>) -> Self {
        Param {
            id: id.into(),
            value_error: Some(value_error.into()),
            ..Default::default()
        }
    }
}
