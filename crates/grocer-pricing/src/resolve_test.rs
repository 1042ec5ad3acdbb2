use serde_json::json;

use super::*;
use grocer_core::{NO_STORE, UNKNOWN_STORE};

fn resolver() -> PriceResolver {
    PriceResolver::with_defaults().expect("default resolver should build")
}

fn resolve(candidates: &[Value], target: &TargetItem) -> ResolvedResult {
    resolver().resolve(candidates, target, &target.name, &target.name)
}

// ---------------------------------------------------------------------------
// Sentinel results
// ---------------------------------------------------------------------------

#[test]
fn empty_candidate_list_yields_sentinel() {
    let result = resolve(&[], &TargetItem::named("eggs"));
    assert_eq!(result.name, "eggs");
    assert_eq!(result.store, NO_STORE);
    assert!(result.price.is_none());
    assert!(result.normalized_price.is_none());
    assert_eq!(result.size, "N/A");
    assert_eq!(result.items_matched, 0);
    assert!(result.stores_searched.is_empty());
    assert!(result.alternatives.is_empty());
}

#[test]
fn brand_mismatch_becomes_alternative_and_sentinel() {
    let target = TargetItem::named("cheddar cheese").with_brand("Kraft");
    let candidates = [json!({
        "name": "Generic Cheddar Cheese",
        "merchant": "StoreC",
        "current_price": 4.00
    })];

    let result = resolve(&candidates, &target);

    assert_eq!(result.store, NO_STORE);
    assert!(result.price.is_none());
    assert_eq!(result.items_matched, 0);
    assert!(result.alternatives.contains("Generic Cheddar Cheese"));
    assert!(result.stores_searched.contains("StoreC"));
}

#[test]
fn matched_but_unpriced_counts_without_winning() {
    let candidates = [json!({"name": "Whole Milk", "merchant": "StoreA"})];
    let result = resolve(&candidates, &TargetItem::named("milk"));
    assert_eq!(result.store, NO_STORE);
    assert_eq!(result.items_matched, 1);
    assert!(result.alternatives.is_empty());
}

#[test]
fn zero_size_match_never_wins() {
    let candidates = [json!({"name": "Milk 0 oz", "merchant": "StoreA", "current_price": 1.0})];
    let result = resolve(&candidates, &TargetItem::named("milk"));
    assert_eq!(result.store, NO_STORE);
    assert_eq!(result.items_matched, 1);
}

// ---------------------------------------------------------------------------
// Row validation and store fallback
// ---------------------------------------------------------------------------

#[test]
fn malformed_rows_are_invisible() {
    let candidates = [
        json!(null),
        json!("Milk"),
        json!({"merchant": "Ghost"}),
        json!({"name": 12, "merchant": "Ghost"}),
    ];
    let result = resolve(&candidates, &TargetItem::named("milk"));
    assert!(result.stores_searched.is_empty());
    assert!(result.alternatives.is_empty());
    assert_eq!(result.items_matched, 0);
}

#[test]
fn blank_names_stay_out_of_alternatives() {
    let candidates = [
        json!({"name": "", "merchant": "Ghost"}),
        json!({"name": "   ", "merchant": "Ghost"}),
        json!({"name": "Paper Towels", "merchant": "StoreA"}),
    ];
    let result = resolve(&candidates, &TargetItem::named("milk"));
    assert_eq!(result.alternatives.len(), 1);
    assert!(result.alternatives.contains("Paper Towels"));
    assert!(!result.stores_searched.contains("Ghost"));
}

#[test]
fn store_falls_back_to_merchant_name_then_unknown() {
    let candidates = [
        json!({"name": "Paper Towels", "merchant_name": "Target"}),
        json!({"name": "Dish Soap"}),
    ];
    let result = resolve(&candidates, &TargetItem::named("milk"));
    assert!(result.stores_searched.contains("Target"));
    assert!(result.stores_searched.contains(UNKNOWN_STORE));
}

// ---------------------------------------------------------------------------
// Fuzzy matching
// ---------------------------------------------------------------------------

#[test]
fn overlap_at_end_of_listing_name_still_matches() {
    let candidates = [json!({"name": "Tyson Chicken", "current_price": 5.0, "merchant": "A"})];
    let result = resolve(&candidates, &TargetItem::named("chicken wings"));
    assert_eq!(result.store, "A");
    assert_eq!(result.items_matched, 1);
}

#[test]
fn partial_word_overlap_matches_listing() {
    let candidates = [json!({"name": "Bertolli Olive", "current_price": 7.0, "merchant": "B"})];
    let result = resolve(&candidates, &TargetItem::named("olive oil"));
    assert_eq!(result.store, "B");
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[test]
fn unit_price_beats_sticker_price() {
    // "gal" is outside the unit vocabulary, so the first row is one "unit"
    // at 3.50 per ounce-equivalent while 0.5 l works out near 0.118.
    let candidates = [
        json!({"name": "2% Milk 1 gal", "current_price": 3.50, "merchant": "StoreA"}),
        json!({"name": "Almond Milk 0.5 l", "current_price": 2.00, "merchant": "StoreB"}),
    ];

    let result = resolve(&candidates, &TargetItem::named("milk"));

    assert_eq!(result.store, "StoreB");
    assert_eq!(result.name, "Almond Milk 0.5 l");
    assert_eq!(result.price, Some(2.0));
    assert_eq!(result.size, "0.5 l");
    let per_oz = result.normalized_price.unwrap();
    assert!((per_oz - 2.0 / 16.907).abs() < 1e-9, "got {per_oz}");
    assert_eq!(result.items_matched, 2);
    assert_eq!(result.stores_searched.len(), 2);
}

#[test]
fn sale_story_price_is_used_when_structured_price_missing() {
    let candidates = [json!({
        "name": "Sharp Cheddar 8 oz",
        "merchant": "StoreD",
        "sale_story": "Now $2.99!"
    })];
    let result = resolve(&candidates, &TargetItem::named("cheddar"));
    assert_eq!(result.price, Some(2.99));
    assert_eq!(result.size, "8 oz");
}

#[test]
fn exact_tie_keeps_first_candidate() {
    let candidates = [
        json!({"name": "Butter 16 oz", "current_price": 4.0, "merchant": "First"}),
        json!({"name": "Butter 1 lb", "current_price": 4.0, "merchant": "Second"}),
    ];
    let result = resolve(&candidates, &TargetItem::named("butter"));
    assert_eq!(result.store, "First");
}

#[test]
fn winner_independent_of_order_without_ties() {
    let a = json!({"name": "Rice 2 lb", "current_price": 3.0, "merchant": "A"});
    let b = json!({"name": "Rice 1 kg", "current_price": 2.0, "merchant": "B"});
    let c = json!({"name": "Rice 500 g", "current_price": 1.5, "merchant": "C"});
    let target = TargetItem::named("rice");

    let forward = resolve(&[a.clone(), b.clone(), c.clone()], &target);
    let backward = resolve(&[c, b, a], &target);
    assert_eq!(forward.store, backward.store);
    assert_eq!(forward.normalized_price, backward.normalized_price);
    assert_eq!(forward.store, "B");
}

#[test]
fn winner_snapshots_provenance_at_time_of_win() {
    let candidates = [
        json!({"name": "Paper Towels", "merchant": "X"}),
        json!({"name": "Milk 64 oz", "current_price": 2.0, "merchant": "A"}),
        json!({"name": "Dish Soap", "merchant": "Y"}),
        json!({"name": "Milk 128 oz", "current_price": 10.0, "merchant": "B"}),
    ];
    let result = resolve(&candidates, &TargetItem::named("milk"));

    assert_eq!(result.store, "A");
    assert_eq!(result.items_matched, 1);
    assert_eq!(
        result.stores_searched.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["A", "X"]
    );
    assert_eq!(result.alternatives.len(), 1);
    assert!(result.alternatives.contains("Paper Towels"));
}

#[test]
fn non_matching_candidate_never_changes_winner() {
    let base = vec![
        json!({"name": "Eggs 12 ct", "current_price": 3.6, "merchant": "A"}),
        json!({"name": "Eggs 18 ct", "current_price": 4.5, "merchant": "B"}),
    ];
    let target = TargetItem::named("eggs");
    let before = resolve(&base, &target);

    let mut extended = base.clone();
    extended.push(json!({"name": "Bacon 1 lb", "current_price": 0.01, "merchant": "C"}));
    let after = resolve(&extended, &target);

    assert_eq!(before.store, after.store);
    assert_eq!(before.normalized_price, after.normalized_price);
    assert_eq!(after.store, "B");
}

#[test]
fn missing_image_and_validity_become_placeholders() {
    let candidates = [json!({"name": "Bread", "current_price": 2.5, "merchant": "A"})];
    let result = resolve(&candidates, &TargetItem::named("bread"));
    assert_eq!(result.image, "N/A");
    assert_eq!(result.valid_until, "N/A");
    assert_eq!(result.size, "1 unit");
}

#[test]
fn carries_image_validity_and_queries() {
    let candidates = [json!({
        "name": "Horizon Organic Milk 64 fl oz",
        "current_price": 5.12,
        "merchant": "Kroger",
        "image_url": "https://img.example/milk.png",
        "valid_to": "2024-10-09T03:59:59+00:00"
    })];
    let target = TargetItem::named("milk").with_brand("Horizon");
    let result = resolver().resolve(&candidates, &target, "milk", "Horizon milk dairy");

    assert_eq!(result.image, "https://img.example/milk.png");
    assert_eq!(result.valid_until, "2024-10-09T03:59:59+00:00");
    assert_eq!(result.original_query, "milk");
    assert_eq!(result.revised_query, "Horizon milk dairy");
    assert_eq!(result.size, "64 fl oz");
}

#[test]
fn resolve_is_idempotent() {
    let candidates = [
        json!({"name": "Oats 42 oz", "current_price": 4.99, "merchant": "A"}),
        json!({"name": "Steel Cut Oats 30 oz", "sale_story": "$3.49", "merchant": "B"}),
        json!({"name": "Granola", "merchant": "C"}),
    ];
    let target = TargetItem::named("oats");
    let r = resolver();
    assert_eq!(
        r.resolve(&candidates, &target, "oats", "oats"),
        r.resolve(&candidates, &target, "oats", "oats")
    );
}

#[test]
fn custom_threshold_and_units_are_honored() {
    let units = UnitTable::from_factors([("gal", 128.0), ("oz", 1.0)]).unwrap();
    let filter = MatchFilter::new(Box::new(crate::matcher::PartialRatio), 100);
    let resolver = PriceResolver::new(units, filter).unwrap();

    let candidates = [
        json!({"name": "Milk 1 gal", "current_price": 3.84, "merchant": "A"}),
        json!({"name": "Milc 64 oz", "current_price": 1.0, "merchant": "B"}),
    ];
    let result = resolver.resolve(&candidates, &TargetItem::named("milk"), "milk", "milk");
    assert_eq!(result.store, "A");
    let per_oz = result.normalized_price.unwrap();
    assert!((per_oz - 0.03).abs() < 1e-9, "got {per_oz}");
    assert!(result.alternatives.contains("Milc 64 oz"));
}
