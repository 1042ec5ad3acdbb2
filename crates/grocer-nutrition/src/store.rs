//! Brand lookups against `branded_food` and item enrichment.

use std::path::Path;

use grocer_core::{ItemEnricher, NutritionFacts, TargetItem};
use sqlx::SqlitePool;

use crate::{connect_pool, NutritionError};

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A `branded_food` row joined with its `food.description`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct NutritionRow {
    pub brand_owner: Option<String>,
    pub ingredients: Option<String>,
    pub serving_size: Option<f64>,
    pub serving_size_unit: Option<String>,
    pub description: Option<String>,
}

impl From<NutritionRow> for NutritionFacts {
    fn from(row: NutritionRow) -> Self {
        Self {
            brand_owner: row.brand_owner,
            ingredients: row.ingredients,
            serving_size: row.serving_size,
            serving_size_unit: row.serving_size_unit,
            description: row.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the first branded food whose owner contains `brand`,
/// case-insensitively, or `None` if there is none.
///
/// # Errors
///
/// Returns [`NutritionError::Sqlx`] if the query fails.
pub async fn lookup_brand(
    pool: &SqlitePool,
    brand: &str,
) -> Result<Option<NutritionRow>, NutritionError> {
    let row = sqlx::query_as::<_, NutritionRow>(
        "SELECT bf.brand_owner, bf.ingredients, CAST(bf.serving_size AS REAL) AS serving_size, \
                bf.serving_size_unit, f.description \
         FROM branded_food AS bf \
         JOIN food AS f ON bf.fdc_id = f.fdc_id \
         WHERE LOWER(bf.brand_owner) LIKE '%' || LOWER(?) || '%' \
         LIMIT 1",
    )
    .bind(brand)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

// ---------------------------------------------------------------------------
// Enricher
// ---------------------------------------------------------------------------

/// [`ItemEnricher`] backed by the nutrition database.
///
/// A store without a pool enriches nothing, which is how a missing database
/// file is handled.
#[derive(Debug, Clone, Default)]
pub struct NutritionStore {
    pool: Option<SqlitePool>,
}

impl NutritionStore {
    #[must_use]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool: Some(pool) }
    }

    /// A store that leaves every item unchanged.
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Opens the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NutritionError`] if the database is missing or cannot be
    /// opened.
    pub async fn connect(path: &Path) -> Result<Self, NutritionError> {
        Ok(Self::from_pool(connect_pool(path).await?))
    }

    /// Opens the database at `path`, falling back to a disabled store.
    pub async fn open_or_disabled(path: &Path) -> Self {
        match Self::connect(path).await {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "nutrition database unavailable, items will not be enriched"
                );
                Self::disabled()
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }
}

impl ItemEnricher for NutritionStore {
    async fn enrich(&self, mut item: TargetItem) -> TargetItem {
        let Some(pool) = &self.pool else {
            return item;
        };
        let Some(brand) = item.brand().map(str::to_owned) else {
            return item;
        };

        match lookup_brand(pool, &brand).await {
            Ok(Some(row)) => {
                tracing::debug!(item = %item.name, brand = %brand, "nutrition data found");
                item.nutrition = Some(row.into());
            }
            Ok(None) => {
                tracing::debug!(item = %item.name, brand = %brand, "no nutrition data for brand");
            }
            Err(e) => {
                tracing::warn!(item = %item.name, brand = %brand, error = %e, "nutrition lookup failed");
            }
        }
        item
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
