//! Flyer catalog search client.
//!
//! [`FlyerClient`] talks to the flyer search backend, [`ResponseArchive`]
//! keeps raw responses on disk for offline replay, and [`FlyerSearch`] ties
//! both to the engine's [`grocer_core::CatalogSearch`] seam.

pub mod archive;
pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod search;
pub mod types;

pub use archive::ResponseArchive;
pub use client::FlyerClient;
pub use error::FlyerError;
pub use search::FlyerSearch;
pub use types::SearchResponse;
