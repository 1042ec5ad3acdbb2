//! Plain-text rendering of a list outcome.

use std::fmt::Write as _;

use chrono::NaiveDate;
use grocer_core::{ResolvedResult, RunStatistics, NOT_AVAILABLE};
use grocer_pricing::ListOutcome;

const WIDTH: usize = 79;

/// Renders the per-item report followed by the store summary.
pub(crate) fn render(outcome: &ListOutcome) -> String {
    let mut out = String::new();
    let banner = "=".repeat(30);
    let _ = writeln!(out, "\n{banner}  SEARCH RESULTS  {banner}\n");

    for result in &outcome.results {
        render_item(&mut out, result);
        let _ = writeln!(out, "\n{}\n", "-".repeat(WIDTH));
    }

    render_summary(&mut out, &outcome.stats);
    let _ = writeln!(out, "{}", "=".repeat(WIDTH));
    out
}

fn render_item(out: &mut String, result: &ResolvedResult) {
    let _ = writeln!(out, "[Search] {}", title_case(&result.original_query));
    let _ = writeln!(out, "    Revised Search: {}", result.revised_query);

    let stores = join(result.stores_searched.iter().map(String::as_str));
    if result.is_found() {
        let _ = writeln!(out, "    Matched Item: {}", result.name);
        let _ = writeln!(out, "    Stores Searched: {stores}");
        let _ = writeln!(out, "    --> Store Selected: {}", result.store);
        let _ = writeln!(out, "    --> Price: {}", dollars(result.price));
        let _ = writeln!(out, "    --> Size: {}", result.size);
        let normalized = result
            .normalized_price
            .map_or_else(|| NOT_AVAILABLE.to_owned(), |p| format!("${p:.2} per oz"));
        let _ = writeln!(out, "    --> Normalized Price: {normalized}");
        if result.valid_until != NOT_AVAILABLE {
            let _ = writeln!(out, "    --> Valid Until: {}", valid_until(&result.valid_until));
        }
    } else {
        let _ = writeln!(out, "    Matched Item: None");
        let stores = if stores.is_empty() { "None".to_owned() } else { stores };
        let _ = writeln!(out, "    Stores Searched: {stores}");
        let _ = writeln!(out, "    --> Message: No valid items found.");
    }

    if !result.alternatives.is_empty() {
        let _ = writeln!(out, "    Alternatives: {}", join(result.top_alternatives()));
    }
}

fn render_summary(out: &mut String, stats: &RunStatistics) {
    let winners = join(stats.stores.iter().map(String::as_str));
    let winners = if winners.is_empty() { "None".to_owned() } else { winners };
    let _ = writeln!(out, "Stores With Best Prices: {winners}");

    if !stats.store_item_counts.is_empty() {
        let _ = writeln!(out, "Items Seen Per Store:");
        for (store, count) in &stats.store_item_counts {
            let _ = writeln!(out, "    {store}: {count}");
        }
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

fn dollars(amount: Option<f64>) -> String {
    amount.map_or_else(|| NOT_AVAILABLE.to_owned(), |p| format!("${p:.2}"))
}

/// Date part of an ISO-8601 timestamp, or the raw text if it has none.
fn valid_until(raw: &str) -> String {
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map_or_else(|| raw.to_owned(), |d| d.format("%Y-%m-%d").to_string())
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// A word starts after any non-alphabetic character.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
