//! Validation of raw catalog search rows into [`CandidateRecord`].
//!
//! ## Observed shape of flyer search rows
//!
//! Rows arrive as loosely-typed JSON objects. Any field may be missing,
//! `null`, or of an unexpected type:
//! - `name` is the display name and the only field required for matching.
//!   Empty and whitespace-only names have been seen and are unusable.
//! - `merchant` is usually present on flyer rows; e-commerce rows often carry
//!   `merchant_name` instead.
//! - `current_price` is normally a number but has been seen as a numeric
//!   string; anything else is treated as absent.
//! - `sale_story` is promotional text such as `"Now $2.99!"`.
//! - `valid_to` is an ISO-8601 timestamp string.

use serde_json::Value;

/// Store label used when a row names neither `merchant` nor `merchant_name`.
pub const UNKNOWN_STORE: &str = "Unknown Store";

/// A catalog row that passed up-front validation.
///
/// Construction through [`CandidateRecord::from_value`] guarantees a
/// non-blank string `name`; every other field is optional and has already been type-checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    pub name: String,
    pub merchant: Option<String>,
    pub merchant_name: Option<String>,
    pub current_price: Option<f64>,
    pub sale_story: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub valid_to: Option<String>,
}

impl CandidateRecord {
    /// Validates a raw search row.
    ///
    /// Returns `None` for non-objects and for objects whose `name` is absent,
    /// not a string, or blank. Such rows are never eligible for matching.
    #[must_use]
    pub fn from_value(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        let name = object
            .get("name")?
            .as_str()
            .filter(|name| !name.trim().is_empty())?
            .to_owned();

        Some(Self {
            name,
            merchant: string_field(raw, "merchant"),
            merchant_name: string_field(raw, "merchant_name"),
            current_price: price_field(raw.get("current_price")),
            sale_story: string_field(raw, "sale_story"),
            description: string_field(raw, "description"),
            image_url: string_field(raw, "image_url"),
            valid_to: string_field(raw, "valid_to"),
        })
    }

    /// Store name, falling back through `merchant`, `merchant_name` and
    /// finally [`UNKNOWN_STORE`]. Blank values count as absent.
    #[must_use]
    pub fn store_name(&self) -> &str {
        self.merchant
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.merchant_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or(UNKNOWN_STORE)
    }
}

/// Store name of a raw row without requiring it to be a valid candidate.
///
/// Returns `None` only when the row is not a JSON object.
#[must_use]
pub fn store_name_of(raw: &Value) -> Option<String> {
    raw.as_object()?;
    let store = ["merchant", "merchant_name"]
        .iter()
        .filter_map(|key| raw.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_STORE);
    Some(store.to_owned())
}

fn string_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn price_field(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_non_object_rows() {
        assert!(CandidateRecord::from_value(&json!(null)).is_none());
        assert!(CandidateRecord::from_value(&json!("milk")).is_none());
        assert!(CandidateRecord::from_value(&json!([1, 2])).is_none());
    }

    #[test]
    fn rejects_missing_or_non_string_name() {
        assert!(CandidateRecord::from_value(&json!({"merchant": "A"})).is_none());
        assert!(CandidateRecord::from_value(&json!({"name": 42})).is_none());
        assert!(CandidateRecord::from_value(&json!({"name": null})).is_none());
    }

    #[test]
    fn rejects_blank_name() {
        assert!(CandidateRecord::from_value(&json!({"name": ""})).is_none());
        assert!(CandidateRecord::from_value(&json!({"name": " \t "})).is_none());
        assert!(store_name_of(&json!({"name": "", "merchant": "Aldi"})).is_some());
    }

    #[test]
    fn reads_optional_fields_leniently() {
        let record = CandidateRecord::from_value(&json!({
            "name": "Milk",
            "merchant": 7,
            "current_price": "3.49",
            "sale_story": "Now $2.99!",
            "valid_to": "2024-10-01T03:59:59+00:00"
        }))
        .unwrap();
        assert_eq!(record.name, "Milk");
        assert!(record.merchant.is_none());
        assert_eq!(record.current_price, Some(3.49));
        assert_eq!(record.sale_story.as_deref(), Some("Now $2.99!"));
        assert_eq!(record.valid_to.as_deref(), Some("2024-10-01T03:59:59+00:00"));
    }

    #[test]
    fn current_price_of_wrong_type_is_absent() {
        let record =
            CandidateRecord::from_value(&json!({"name": "Milk", "current_price": true})).unwrap();
        assert!(record.current_price.is_none());
    }

    #[test]
    fn store_name_falls_back_through_merchant_fields() {
        let a = CandidateRecord::from_value(&json!({"name": "x", "merchant": " Aldi "})).unwrap();
        assert_eq!(a.store_name(), "Aldi");

        let b = CandidateRecord::from_value(
            &json!({"name": "x", "merchant": "", "merchant_name": "Target"}),
        )
        .unwrap();
        assert_eq!(b.store_name(), "Target");

        let c = CandidateRecord::from_value(&json!({"name": "x"})).unwrap();
        assert_eq!(c.store_name(), UNKNOWN_STORE);
    }

    #[test]
    fn store_name_of_counts_nameless_objects() {
        assert_eq!(
            store_name_of(&json!({"merchant_name": "Walmart"})).as_deref(),
            Some("Walmart")
        );
        assert_eq!(store_name_of(&json!({})).as_deref(), Some(UNKNOWN_STORE));
        assert!(store_name_of(&json!(3)).is_none());
    }
}
