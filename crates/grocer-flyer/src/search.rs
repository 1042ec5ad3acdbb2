//! [`CatalogSearch`] backed by the flyer backend.

use grocer_core::CatalogSearch;
use serde_json::Value;

use crate::archive::ResponseArchive;
use crate::client::{decode_response, FlyerClient};

/// Flyer search for one postal code.
///
/// Failures never reach the engine: an unreachable backend or a malformed
/// body is logged and searched as "no candidates".
#[derive(Debug, Clone)]
pub struct FlyerSearch {
    client: FlyerClient,
    postal_code: String,
    archive: Option<ResponseArchive>,
}

impl FlyerSearch {
    #[must_use]
    pub fn new(client: FlyerClient, postal_code: impl Into<String>) -> Self {
        Self {
            client,
            postal_code: postal_code.into(),
            archive: None,
        }
    }

    /// Archives every raw response before decoding it.
    #[must_use]
    pub fn with_archive(mut self, archive: ResponseArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

impl CatalogSearch for FlyerSearch {
    async fn search(&self, query: &str) -> Vec<Value> {
        let body = match self.client.search_raw(query, &self.postal_code).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(query, error = %e, "flyer search failed");
                return Vec::new();
            }
        };

        if let Some(archive) = &self.archive {
            if let Err(e) = archive.save(query, &body).await {
                tracing::warn!(query, error = %e, "failed to archive search response");
            }
        }

        match decode_response(query, body) {
            Ok(response) => {
                let candidates = response.into_candidates();
                tracing::debug!(query, candidates = candidates.len(), "flyer search complete");
                candidates
            }
            Err(e) => {
                tracing::error!(query, error = %e, "unexpected flyer search response");
                Vec::new()
            }
        }
    }
}
