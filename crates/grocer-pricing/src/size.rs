//! Package size recovery from a candidate's display name.

use grocer_core::{CandidateRecord, SizeSpec};
use regex::Regex;

use crate::error::PricingError;
use crate::units::UnitTable;

/// Finds the first `<number><optional whitespace><unit>` in a display name.
///
/// Unit tokens come from a [`UnitTable`] and are matched literally and
/// case-insensitively, longest token first so that `"fl oz"` is never split
/// into a stray `"fl"` and `"oz"`. A token must end at a word boundary:
/// `"1 gal"` does not read as one gram. The same rule means plural or
/// abbreviated spellings outside the vocabulary, such as `"3 lbs"`,
/// `"6 packs"` or `"12 cts"`, are not sizes and fall back to `{1, "unit"}`.
/// Add those spellings to the unit table to price them.
#[derive(Debug, Clone)]
pub struct SizeExtractor {
    pattern: Option<Regex>,
}

impl SizeExtractor {
    /// Compiles the size pattern for the table's vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Vocabulary`] if the generated pattern does not
    /// compile.
    pub fn new(units: &UnitTable) -> Result<Self, PricingError> {
        let mut tokens: Vec<&str> = units.units().collect();
        if tokens.is_empty() {
            return Ok(Self { pattern: None });
        }
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = tokens
            .iter()
            .map(|t| {
                t.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*({alternation})\b"))?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Size of the candidate's package, or `{1, "unit"}` when the name has no
    /// recognizable size.
    #[must_use]
    pub fn extract(&self, candidate: &CandidateRecord) -> SizeSpec {
        self.extract_from_name(&candidate.name)
    }

    /// Same as [`SizeExtractor::extract`] for a bare display name.
    #[must_use]
    pub fn extract_from_name(&self, name: &str) -> SizeSpec {
        let Some(pattern) = &self.pattern else {
            return SizeSpec::default();
        };
        if name.is_empty() {
            return SizeSpec::default();
        }

        let lower = name.to_lowercase();
        let Some(caps) = pattern.captures(&lower) else {
            return SizeSpec::default();
        };

        let magnitude = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|m| m.is_finite() && *m >= 0.0);
        let unit = caps
            .get(2)
            .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "));

        match (magnitude, unit) {
            (Some(magnitude), Some(unit)) => SizeSpec::new(magnitude, unit),
            _ => SizeSpec::default(),
        }
    }
}
