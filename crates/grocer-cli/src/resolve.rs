//! `resolve`: price one item against an archived search response.

use std::path::PathBuf;

use grocer_core::{build_query, store_name_of, AppConfig, RunStatistics, TargetItem};
use grocer_flyer::ResponseArchive;
use grocer_pricing::ListOutcome;

#[derive(Debug, Default)]
pub(crate) struct ResolveArgs {
    pub candidates: PathBuf,
    pub name: String,
    pub brand: Option<String>,
    pub kind: Option<String>,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub json: bool,
}

impl ResolveArgs {
    fn target(&self) -> anyhow::Result<TargetItem> {
        TargetItem {
            name: self.name.clone(),
            brand: self.brand.clone(),
            kind: self.kind.clone(),
            quantity: self.quantity.clone(),
            category: self.category.clone(),
            ..TargetItem::default()
        }
        .normalized()
        .ok_or_else(|| anyhow::anyhow!("--name must not be blank"))
    }
}

/// Resolves one item offline and prints the outcome.
///
/// # Errors
///
/// Returns an error if the item name is blank, the archive cannot be read,
/// or the unit table cannot be loaded.
pub(crate) fn run_resolve(config: &AppConfig, args: ResolveArgs) -> anyhow::Result<()> {
    let outcome = resolve_offline(config, &args)?;
    crate::print_outcome(&outcome, args.json)
}

fn resolve_offline(config: &AppConfig, args: &ResolveArgs) -> anyhow::Result<ListOutcome> {
    let target = args.target()?;
    let candidates = ResponseArchive::load(&args.candidates)?.into_candidates();
    tracing::info!(
        path = %args.candidates.display(),
        candidates = candidates.len(),
        "loaded archived search response"
    );

    let resolver = crate::build_resolver(config)?;
    let revised_query = build_query(&target);
    let result = resolver.resolve(&candidates, &target, &target.name, &revised_query);

    let mut stats = RunStatistics::default();
    for store in candidates.iter().filter_map(store_name_of) {
        stats.record_candidate(&store);
    }
    stats.record_result(&result);

    Ok(ListOutcome {
        results: vec![result],
        stats,
    })
}
