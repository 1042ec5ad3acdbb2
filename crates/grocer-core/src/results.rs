use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::candidate::UNKNOWN_STORE;

/// Store label of a result that found no priced match.
pub const NO_STORE: &str = "None";

/// Placeholder for absent image, size and validity fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of alternatives shown per item in the report.
const DISPLAY_ALTERNATIVES: usize = 5;

/// Package size recovered from a display name, e.g. `12 oz`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    pub magnitude: f64,
    pub unit: String,
}

impl SizeSpec {
    #[must_use]
    pub fn new(magnitude: f64, unit: impl Into<String>) -> Self {
        Self {
            magnitude,
            unit: unit.into(),
        }
    }
}

impl Default for SizeSpec {
    /// One unit of an unknown size.
    fn default() -> Self {
        Self::new(1.0, "unit")
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// Cheapest-match recommendation for one target item, with provenance.
///
/// When `price` is `None`, `normalized_price` is `None` and `store` is
/// [`NO_STORE`]; otherwise both prices are set and `store` names a merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedResult {
    pub name: String,
    pub image: String,
    pub price: Option<f64>,
    pub size: String,
    /// Price per ounce-equivalent.
    pub normalized_price: Option<f64>,
    pub store: String,
    pub valid_until: String,
    pub original_query: String,
    pub revised_query: String,
    pub stores_searched: BTreeSet<String>,
    pub items_matched: usize,
    pub alternatives: BTreeSet<String>,
}

impl ResolvedResult {
    /// Result for an item with no priced match among the candidates.
    #[must_use]
    pub fn not_found(
        name: &str,
        original_query: &str,
        revised_query: &str,
        stores_searched: BTreeSet<String>,
        items_matched: usize,
        alternatives: BTreeSet<String>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            image: NOT_AVAILABLE.to_owned(),
            price: None,
            size: NOT_AVAILABLE.to_owned(),
            normalized_price: None,
            store: NO_STORE.to_owned(),
            valid_until: NOT_AVAILABLE.to_owned(),
            original_query: original_query.to_owned(),
            revised_query: revised_query.to_owned(),
            stores_searched,
            items_matched,
            alternatives,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        self.store != NO_STORE
    }

    /// The first alternatives, as shown in the report.
    pub fn top_alternatives(&self) -> impl Iterator<Item = &str> {
        self.alternatives
            .iter()
            .map(String::as_str)
            .take(DISPLAY_ALTERNATIVES)
    }
}

/// Cross-item statistics accumulated over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Stores that won at least one item.
    pub stores: BTreeSet<String>,
    /// Number of candidate rows seen per store, winners or not.
    pub store_item_counts: BTreeMap<String, usize>,
}

impl RunStatistics {
    /// Counts one candidate row for `store`.
    pub fn record_candidate(&mut self, store: &str) {
        *self.store_item_counts.entry(store.to_owned()).or_default() += 1;
    }

    /// Records the winning store of a result, ignoring placeholder stores.
    pub fn record_result(&mut self, result: &ResolvedResult) {
        if result.store != UNKNOWN_STORE && result.store != NO_STORE {
            self.stores.insert(result.store.clone());
        }
    }
}
