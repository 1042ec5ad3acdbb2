//! Candidate-to-target matching: hard brand filter plus fuzzy name score.

use grocer_core::{CandidateRecord, MatcherKind, TargetItem};

use crate::fuzzy::partial_ratio;

/// Default acceptance threshold on the 0–100 similarity scale.
pub const DEFAULT_THRESHOLD: u8 = 70;

/// A pluggable name-similarity strategy scoring two lower-cased strings 0–100.
pub trait SimilarityScorer: std::fmt::Debug + Send + Sync {
    fn score(&self, target: &str, candidate: &str) -> u8;
}

/// Best-substring-alignment scorer, see [`partial_ratio`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl SimilarityScorer for PartialRatio {
    fn score(&self, target: &str, candidate: &str) -> u8 {
        partial_ratio(target, candidate)
    }
}

/// Jaro-Winkler similarity scaled to 0–100.
///
/// Whole-string rather than substring-tolerant, so it is stricter on long
/// flyer listings than [`PartialRatio`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl SimilarityScorer for JaroWinkler {
    fn score(&self, target: &str, candidate: &str) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let score = (strsim::jaro_winkler(target, candidate) * 100.0).round() as u8;
        score
    }
}

/// Decides whether a candidate plausibly is the target item.
///
/// The brand is a hard constraint: a different brand is categorically wrong,
/// not "close", so it never enters the fuzzy score.
#[derive(Debug)]
pub struct MatchFilter {
    scorer: Box<dyn SimilarityScorer>,
    threshold: u8,
}

impl Default for MatchFilter {
    fn default() -> Self {
        Self::new(Box::new(PartialRatio), DEFAULT_THRESHOLD)
    }
}

impl MatchFilter {
    #[must_use]
    pub fn new(scorer: Box<dyn SimilarityScorer>, threshold: u8) -> Self {
        Self { scorer, threshold }
    }

    /// Filter using the configured strategy.
    #[must_use]
    pub fn from_kind(kind: MatcherKind, threshold: u8) -> Self {
        let scorer: Box<dyn SimilarityScorer> = match kind {
            MatcherKind::PartialRatio => Box::new(PartialRatio),
            MatcherKind::JaroWinkler => Box::new(JaroWinkler),
        };
        Self::new(scorer, threshold)
    }

    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// `true` when the target has no brand, or its brand appears
    /// (case-insensitively) in the candidate's name.
    #[must_use]
    pub fn brand_satisfied(&self, candidate: &CandidateRecord, target: &TargetItem) -> bool {
        match target.brand() {
            Some(brand) => candidate
                .name
                .to_lowercase()
                .contains(&brand.to_lowercase()),
            None => true,
        }
    }

    /// Brand constraint, then fuzzy name similarity at or above the threshold.
    #[must_use]
    pub fn matches(&self, candidate: &CandidateRecord, target: &TargetItem) -> bool {
        if candidate.name.trim().is_empty() {
            return false;
        }
        if !self.brand_satisfied(candidate, target) {
            return false;
        }
        let score = self.scorer.score(
            &target.name.to_lowercase(),
            &candidate.name.to_lowercase(),
        );
        score >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str) -> CandidateRecord {
        CandidateRecord {
            name: name.to_owned(),
            ..CandidateRecord::default()
        }
    }

    #[test]
    fn fuzzy_name_match_without_brand() {
        let filter = MatchFilter::default();
        let target = TargetItem::named("Milk");
        assert!(filter.matches(&candidate("Organic 2% MILK Gallon"), &target));
        assert!(!filter.matches(&candidate("Paper Towels"), &target));
    }

    #[test]
    fn brand_is_a_hard_filter() {
        let filter = MatchFilter::default();
        let target = TargetItem::named("cheddar cheese").with_brand("Kraft");
        assert!(!filter.matches(&candidate("Generic Cheddar Cheese"), &target));
        assert!(filter.matches(&candidate("KRAFT Sharp Cheddar Cheese"), &target));
    }

    #[test]
    fn brand_match_alone_is_not_enough() {
        let filter = MatchFilter::default();
        let target = TargetItem::named("cheddar cheese").with_brand("Kraft");
        assert!(!filter.matches(&candidate("Kraft Mac & Dinner"), &target));
    }

    #[test]
    fn blank_candidate_name_never_matches() {
        let filter = MatchFilter::new(Box::new(PartialRatio), 0);
        assert!(!filter.matches(&candidate("   "), &TargetItem::named("milk")));
    }

    #[test]
    fn threshold_is_inclusive() {
        #[derive(Debug)]
        struct Fixed(u8);
        impl SimilarityScorer for Fixed {
            fn score(&self, _: &str, _: &str) -> u8 {
                self.0
            }
        }
        let target = TargetItem::named("milk");
        assert!(MatchFilter::new(Box::new(Fixed(70)), 70).matches(&candidate("x"), &target));
        assert!(!MatchFilter::new(Box::new(Fixed(69)), 70).matches(&candidate("x"), &target));
    }

    #[test]
    fn jaro_winkler_scores_identical_as_100() {
        assert_eq!(JaroWinkler.score("milk", "milk"), 100);
        assert!(JaroWinkler.score("milk", "ground beef") < 70);
    }

    #[test]
    fn from_kind_keeps_threshold() {
        let filter = MatchFilter::from_kind(MatcherKind::JaroWinkler, 90);
        assert_eq!(filter.threshold(), 90);
    }
}
