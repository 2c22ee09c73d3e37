//! Catalog and interaction snapshot sources
//!
//! The recommendation core only ever sees a validated [`Snapshot`]. Stores
//! decide where the records come from: a JSON file, the built-in sample
//! dataset, or Postgres.

use std::sync::Arc;

use crate::{config::Config, error::AppResult, models::Snapshot};

pub mod memory;
pub mod postgres;

pub use memory::{sample_snapshot, InMemoryStore};
pub use postgres::PgStore;

/// Supplies immutable catalog/interaction snapshots for a request
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns the current snapshot. Callers must not assume two calls
    /// return the same version.
    async fn snapshot(&self) -> AppResult<Arc<Snapshot>>;
}

/// Builds the store selected by configuration: Postgres when a database
/// URL is set, then a JSON dataset file, then the sample dataset.
pub async fn from_config(config: &Config) -> AppResult<Arc<dyn CatalogStore>> {
    if let Some(database_url) = &config.database_url {
        tracing::info!("Using Postgres catalog store");
        return Ok(Arc::new(PgStore::connect(database_url).await?));
    }

    if let Some(path) = &config.dataset_path {
        tracing::info!(path = %path, "Using JSON dataset store");
        return Ok(Arc::new(InMemoryStore::from_json_file(path).await?));
    }

    tracing::info!("Using built-in sample dataset");
    Ok(Arc::new(InMemoryStore::new(sample_snapshot()?)))
}
