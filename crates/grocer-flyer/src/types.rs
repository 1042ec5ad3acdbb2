//! Response shape of the flyer search backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `GET {backend}?q=…&postal_code=…`.
///
/// The backend returns flyer rows under `items`, online-store rows under
/// `ecom_items` and loosely related rows under `related_items`. Any of the
/// three may be missing or `null`. Rows are kept as raw JSON; validation
/// happens in the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecom_items: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_items: Option<Vec<Value>>,
}

impl SearchResponse {
    /// All rows as one candidate list: `items`, then `ecom_items`, then
    /// `related_items`.
    #[must_use]
    pub fn into_candidates(self) -> Vec<Value> {
        [self.items, self.ecom_items, self.related_items]
            .into_iter()
            .flatten()
            .flatten()
            .collect()
    }
}
