//! Price recovery from a validated candidate row.

use std::sync::LazyLock;

use grocer_core::CandidateRecord;
use regex::Regex;

/// Optional `$`, digits, optional one- or two-digit fraction.
static DOLLAR_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\s*([0-9]+(?:\.[0-9]{1,2})?)").expect("valid dollar amount regex")
});

/// Returns the candidate's price.
///
/// A structured `current_price` wins outright. Otherwise `sale_story`, the
/// display name and `description` are scanned in that order and the first
/// dollar amount found is returned; later fields are not consulted.
///
/// Returns `None` rather than zero when no price can be recovered.
#[must_use]
pub fn extract_price(candidate: &CandidateRecord) -> Option<f64> {
    if let Some(price) = candidate.current_price {
        return Some(price);
    }

    let text_fields = [
        candidate.sale_story.as_deref(),
        Some(candidate.name.as_str()),
        candidate.description.as_deref(),
    ];

    text_fields
        .into_iter()
        .flatten()
        .filter(|text| !text.is_empty())
        .find_map(scan_dollar_amount)
}

fn scan_dollar_amount(text: &str) -> Option<f64> {
    DOLLAR_AMOUNT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
