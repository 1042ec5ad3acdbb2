//! Read-only access to the branded-food nutrition database.
//!
//! The database is a `SQLite` export of `FoodData` Central with the
//! `branded_food` and `food` tables. [`NutritionStore`] looks items up by
//! brand and attaches what it finds to the item; it never fails a run.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

pub mod store;

pub use store::{lookup_brand, NutritionRow, NutritionStore};

const MAX_CONNECTIONS: u32 = 4;
const ACQUIRE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("nutrition database not found at {0}")]
    MissingDatabase(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens a read-only pool on the database file at `path`.
///
/// # Errors
///
/// Returns [`NutritionError::MissingDatabase`] if the file does not exist, or
/// [`NutritionError::Sqlx`] if the connection cannot be established.
pub async fn connect_pool(path: &Path) -> Result<SqlitePool, NutritionError> {
    if !path.is_file() {
        return Err(NutritionError::MissingDatabase(path.display().to_string()));
    }
    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .create_if_missing(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect_with(options)
        .await?;
    Ok(pool)
}
