//! Shared domain types, query construction, collaborator traits and
//! application configuration for the grocery price finder.

pub mod app_config;
pub mod candidate;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod items;
pub mod query;
pub mod results;

pub use app_config::{AppConfig, MatcherKind};
pub use candidate::{store_name_of, CandidateRecord, UNKNOWN_STORE};
pub use collaborators::{CatalogSearch, ItemEnricher, Passthrough};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use items::{NutritionFacts, TargetItem};
pub use query::build_query;
pub use results::{ResolvedResult, RunStatistics, SizeSpec, NO_STORE, NOT_AVAILABLE};
