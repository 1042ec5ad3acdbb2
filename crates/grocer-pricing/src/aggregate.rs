//! Runs the resolver over a whole grocery list.

use futures::stream::{self, StreamExt};
use grocer_core::{
    build_query, store_name_of, CatalogSearch, ItemEnricher, ResolvedResult, RunStatistics,
    TargetItem,
};
use serde::Serialize;

use crate::resolve::PriceResolver;

/// Ordered results for a list plus the statistics gathered while producing
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListOutcome {
    /// One result per input item, in input order.
    pub results: Vec<ResolvedResult>,
    pub stats: RunStatistics,
}

/// Everything one item's pipeline produced, merged into [`ListOutcome`]
/// after all items complete.
struct ItemOutcome {
    result: ResolvedResult,
    candidate_stores: Vec<String>,
}

/// Drives enrich, query, search and resolve for each target item.
pub struct ListAggregator<S, E> {
    search: S,
    enricher: E,
    resolver: PriceResolver,
    max_concurrent_items: usize,
}

impl<S, E> ListAggregator<S, E>
where
    S: CatalogSearch,
    E: ItemEnricher,
{
    /// Aggregator that processes one item at a time.
    #[must_use]
    pub fn new(search: S, enricher: E, resolver: PriceResolver) -> Self {
        Self {
            search,
            enricher,
            resolver,
            max_concurrent_items: 1,
        }
    }

    /// Allows up to `n` items in flight at once. Results still come back in
    /// input order. Zero is treated as one.
    #[must_use]
    pub fn with_max_concurrent_items(mut self, n: usize) -> Self {
        self.max_concurrent_items = n.max(1);
        self
    }

    #[must_use]
    pub fn search(&self) -> &S {
        &self.search
    }

    #[must_use]
    pub fn resolver(&self) -> &PriceResolver {
        &self.resolver
    }

    /// Resolves every item. Each input item yields exactly one result, a
    /// "not found" result when nothing usable turned up.
    pub async fn process(&self, items: Vec<TargetItem>) -> ListOutcome {
        let total = items.len();
        tracing::info!(items = total, concurrency = self.max_concurrent_items, "processing grocery list");

        let outcomes: Vec<ItemOutcome> = stream::iter(items)
            .map(|item| self.process_item(item))
            .buffered(self.max_concurrent_items)
            .collect()
            .await;

        let mut stats = RunStatistics::default();
        let mut results = Vec::with_capacity(total);
        for outcome in outcomes {
            for store in &outcome.candidate_stores {
                stats.record_candidate(store);
            }
            stats.record_result(&outcome.result);
            results.push(outcome.result);
        }

        let found = results.iter().filter(|r| r.is_found()).count();
        tracing::info!(items = total, found, stores = stats.stores.len(), "grocery list processed");

        ListOutcome { results, stats }
    }

    async fn process_item(&self, item: TargetItem) -> ItemOutcome {
        let original_query = item.name.clone();
        let enriched = self.enricher.enrich(item).await;
        let revised_query = build_query(&enriched);
        tracing::debug!(original = %original_query, revised = %revised_query, "searching catalog");

        let candidates = self.search.search(&revised_query).await;
        let candidate_stores = candidates.iter().filter_map(store_name_of).collect();

        let result = self
            .resolver
            .resolve(&candidates, &enriched, &original_query, &revised_query);

        ItemOutcome {
            result,
            candidate_stores,
        }
    }
}

impl<S, E> std::fmt::Debug for ListAggregator<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListAggregator")
            .field("resolver", &self.resolver)
            .field("max_concurrent_items", &self.max_concurrent_items)
            .finish_non_exhaustive()
    }
}
