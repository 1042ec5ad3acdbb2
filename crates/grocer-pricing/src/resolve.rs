//! Selection of the cheapest valid match for one target item.

use std::collections::BTreeSet;

use grocer_core::{CandidateRecord, ResolvedResult, TargetItem, NOT_AVAILABLE};
use serde_json::Value;

use crate::error::PricingError;
use crate::matcher::MatchFilter;
use crate::price::extract_price;
use crate::size::SizeExtractor;
use crate::units::UnitTable;

/// The price resolution engine for a single target item.
///
/// Pure over its inputs: resolving the same candidates for the same target
/// always yields an identical [`ResolvedResult`].
#[derive(Debug)]
pub struct PriceResolver {
    units: UnitTable,
    sizes: SizeExtractor,
    filter: MatchFilter,
}

impl PriceResolver {
    /// Builds a resolver whose size vocabulary is the unit table's key set.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Vocabulary`] if the size pattern does not compile.
    pub fn new(units: UnitTable, filter: MatchFilter) -> Result<Self, PricingError> {
        let sizes = SizeExtractor::new(&units)?;
        Ok(Self {
            units,
            sizes,
            filter,
        })
    }

    /// Resolver with the built-in unit table and the default partial-ratio
    /// filter at threshold 70.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Vocabulary`] if the size pattern does not compile.
    pub fn with_defaults() -> Result<Self, PricingError> {
        Self::new(UnitTable::default(), MatchFilter::default())
    }

    #[must_use]
    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    /// Folds over `candidates` in order and returns the match with the lowest
    /// price per ounce-equivalent.
    ///
    /// Rows without a string `name` are skipped outright. Every other row
    /// records its store; non-matching rows become alternatives; matching
    /// rows count toward `items_matched` and compete on normalized price
    /// when one can be computed. On an exact tie the earlier row wins. The
    /// winner carries the provenance accumulated up to the moment it won.
    ///
    /// When nothing wins, the result is the "not found" sentinel carrying
    /// the final provenance.
    #[must_use]
    pub fn resolve(
        &self,
        candidates: &[Value],
        target: &TargetItem,
        original_query: &str,
        revised_query: &str,
    ) -> ResolvedResult {
        tracing::debug!(item = %target.name, candidates = candidates.len(), "finding cheapest item");

        let mut best: Option<ResolvedResult> = None;
        let mut best_normalized_price = f64::INFINITY;
        let mut stores_searched: BTreeSet<String> = BTreeSet::new();
        let mut items_matched = 0usize;
        let mut alternatives: BTreeSet<String> = BTreeSet::new();

        for raw in candidates {
            let Some(candidate) = CandidateRecord::from_value(raw) else {
                tracing::debug!("skipping row without a valid name");
                continue;
            };

            let store = candidate.store_name().to_owned();
            stores_searched.insert(store.clone());

            if !self.filter.matches(&candidate, target) {
                tracing::debug!(candidate = %candidate.name, "item does not match");
                alternatives.insert(candidate.name);
                continue;
            }
            items_matched += 1;

            let Some(price) = extract_price(&candidate) else {
                tracing::debug!(candidate = %candidate.name, "no price found");
                continue;
            };

            let size = self.sizes.extract(&candidate);
            let normalized_price = self.units.normalize(Some(price), &size);

            if !self.filter.brand_satisfied(&candidate, target) {
                tracing::debug!(candidate = %candidate.name, "brand mismatch");
                continue;
            }

            let Some(normalized_price) = normalized_price else {
                continue;
            };
            if normalized_price < best_normalized_price {
                best_normalized_price = normalized_price;
                tracing::debug!(
                    candidate = %candidate.name,
                    store = %store,
                    normalized_price,
                    "new cheapest item found"
                );
                best = Some(ResolvedResult {
                    name: candidate.name,
                    image: candidate
                        .image_url
                        .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
                    price: Some(price),
                    size: size.to_string(),
                    normalized_price: Some(normalized_price),
                    store,
                    valid_until: candidate
                        .valid_to
                        .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
                    original_query: original_query.to_owned(),
                    revised_query: revised_query.to_owned(),
                    stores_searched: stores_searched.clone(),
                    items_matched,
                    alternatives: alternatives.clone(),
                });
            }
        }

        best.unwrap_or_else(|| {
            tracing::warn!(item = %target.name, "no valid items found");
            ResolvedResult::not_found(
                &target.name,
                original_query,
                revised_query,
                stores_searched,
                items_matched,
                alternatives,
            )
        })
    }
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
