use crate::items::TargetItem;

/// Builds the catalog search query for an item.
///
/// Joins brand, name, type, quantity and category with single spaces, in
/// that order, skipping absent or blank fields.
#[must_use]
pub fn build_query(item: &TargetItem) -> String {
    let parts = [
        item.brand.as_deref(),
        Some(item.name.as_str()),
        item.kind.as_deref(),
        item.quantity.as_deref(),
        item.category.as_deref(),
    ];

    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
