//! Order items and their quirky quantity encoding.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An item quantity as carried on the wire.
///
/// The server encodes quantities as strings: a plain (optionally
/// `-`-prefixed) digit sequence is a count, while `"unlimited"` and any
/// other non-numeric string denote an unmetered subscription. Serializing
/// [`Quantity::Unlimited`] always reproduces the `"unlimited"` string;
/// counts are emitted as JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Count(i64),
    Unlimited,
}

impl Quantity {
    /// Parse a wire string into a quantity.
    pub fn from_wire(raw: &str) -> Self {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            match raw.parse::<i64>() {
                Ok(n) => Quantity::Count(n),
                Err(_) => Quantity::Unlimited,
            }
        } else {
            Quantity::Unlimited
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Quantity::Unlimited)
    }

    /// The numeric count, if this quantity is metered.
    pub fn count(&self) -> Option<i64> {
        match self {
            Quantity::Count(n) => Some(*n),
            Quantity::Unlimited => None,
        }
    }

    /// Whether this quantity represents any provisioned capacity.
    /// Unlimited counts as positive.
    pub fn is_positive(&self) -> bool {
        match self {
            Quantity::Count(n) => *n > 0,
            Quantity::Unlimited => true,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Quantity::Count(0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Count(n) => write!(f, "{}", n),
            Quantity::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::Count(n) => serializer.serialize_i64(*n),
            Quantity::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a quantity string or integer")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Quantity, E> {
        Ok(Quantity::from_wire(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Quantity, E> {
        Ok(Quantity::Count(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Quantity, E> {
        match i64::try_from(value) {
            Ok(n) => Ok(Quantity::Count(n)),
            Err(_) => Ok(Quantity::Unlimited),
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Quantity, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

/// Renewal terms attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Renewal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_delta: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_uom: Option<String>,
}

/// A single line item of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub mpn: String,

    #[serde(default)]
    pub global_id: String,

    pub quantity: Quantity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_quantity: Option<Quantity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal: Option<Renewal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn digit_strings_parse_as_counts() {
        assert_eq!(Quantity::from_wire("10"), Quantity::Count(10));
        assert_eq!(Quantity::from_wire("0"), Quantity::Count(0));
        assert_eq!(Quantity::from_wire("-5"), Quantity::Count(-5));
    }

    #[test]
    fn non_numeric_strings_parse_as_unlimited() {
        assert_eq!(Quantity::from_wire("unlimited"), Quantity::Unlimited);
        assert_eq!(Quantity::from_wire("lots"), Quantity::Unlimited);
        assert_eq!(Quantity::from_wire(""), Quantity::Unlimited);
        assert_eq!(Quantity::from_wire("3.5"), Quantity::Unlimited);
        assert_eq!(Quantity::from_wire("+5"), Quantity::Unlimited);
    }

    #[test]
    fn unlimited_round_trips_as_the_sentinel_string() {
        let item: Item = serde_json::from_str(
            r#"{"mpn": "SKU-A", "global_id": "ITM-1", "quantity": "unlimited"}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, Quantity::Unlimited);

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["quantity"], serde_json::json!("unlimited"));
    }

    #[test]
    fn counts_serialize_as_numbers() {
        let item: Item =
            serde_json::from_str(r#"{"mpn": "SKU-A", "global_id": "ITM-1", "quantity": "42"}"#)
                .unwrap();
        assert_eq!(item.quantity, Quantity::Count(42));

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["quantity"], serde_json::json!(42));
    }

    #[test]
    fn numeric_wire_quantities_are_accepted() {
        let item: Item = serde_json::from_str(
            r#"{"mpn": "SKU-A", "global_id": "ITM-1", "quantity": 7, "old_quantity": 3}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, Quantity::Count(7));
        assert_eq!(item.old_quantity, Some(Quantity::Count(3)));
    }
}
