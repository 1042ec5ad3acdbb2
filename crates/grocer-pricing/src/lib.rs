//! Price resolution engine.
//!
//! Given a target item and the raw rows of a catalog search, extracts prices
//! and package sizes, normalizes them to a price per ounce-equivalent,
//! filters rows by brand and fuzzy name similarity, and selects the cheapest
//! valid match while tracking provenance. [`ListAggregator`] runs the engine
//! over a whole grocery list.

pub mod aggregate;
pub mod error;
pub mod fuzzy;
pub mod matcher;
pub mod price;
pub mod resolve;
pub mod size;
pub mod units;

pub use aggregate::{ListAggregator, ListOutcome};
pub use error::PricingError;
pub use fuzzy::partial_ratio;
pub use matcher::{JaroWinkler, MatchFilter, PartialRatio, SimilarityScorer};
pub use price::extract_price;
pub use resolve::PriceResolver;
pub use size::SizeExtractor;
pub use units::UnitTable;
