//! Seams between the price resolution engine and its I/O collaborators.
//!
//! Implementations own their failure handling: a failed search degrades to
//! an empty candidate list and a failed lookup leaves the item unenriched, so
//! the engine always receives well-formed input.

use std::future::Future;

use serde_json::Value;

use crate::items::TargetItem;

/// Catalog search returning raw, loosely-typed candidate rows.
pub trait CatalogSearch {
    fn search(&self, query: &str) -> impl Future<Output = Vec<Value>> + Send;
}

/// Reference-data enrichment applied before the query is built.
pub trait ItemEnricher {
    fn enrich(&self, item: TargetItem) -> impl Future<Output = TargetItem> + Send;
}

/// Enricher that returns items unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl ItemEnricher for Passthrough {
    async fn enrich(&self, item: TargetItem) -> TargetItem {
        item
    }
}
