use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::PointOfInterest;
use crate::services::catalog::{CatalogError, PoiSource};

/// Errors that can occur with cache operations
#[derive(Debug, Error, Clone)]
pub enum CacheError {
    #[error("Failed to load dataset: {0}")]
    Load(Arc<CatalogError>),
}

impl CacheError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::Load(e) if matches!(**e, CatalogError::NotFound(_) | CatalogError::InvalidName(_)))
    }
}

/// Loaded point-of-interest datasets, keyed by dataset name
///
/// Owned by the application state and handed to whoever needs it. Concurrent
/// misses on the same dataset share a single load.
pub struct PoiCache<S> {
    source: Arc<S>,
    datasets: moka::future::Cache<String, Arc<Vec<PointOfInterest>>>,
}

impl<S: PoiSource> PoiCache<S> {
    /// Create a new cache over `source`
    pub fn new(source: S, max_datasets: u64, ttl_secs: u64) -> Self {
        let datasets = moka::future::CacheBuilder::new(max_datasets)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            source: Arc::new(source),
            datasets,
        }
    }

    /// Get a dataset, loading it on a miss
    pub async fn get(&self, dataset: &str) -> Result<Arc<Vec<PointOfInterest>>, CacheError> {
        if let Some(points) = self.datasets.get(dataset).await {
            tracing::trace!("Dataset cache hit: {}", dataset);
            return Ok(points);
        }

        let source = Arc::clone(&self.source);
        let name = dataset.to_string();
        self.datasets
            .try_get_with(dataset.to_string(), async move {
                let points = source.load(&name).await?;
                tracing::debug!("Loaded dataset {} ({} points)", name, points.len());
                Ok::<_, CatalogError>(Arc::new(points))
            })
            .await
            .map_err(CacheError::Load)
    }

    /// Drop a dataset so the next `get` reloads it
    pub async fn invalidate(&self, dataset: &str) {
        self.datasets.invalidate(dataset).await;
        tracing::debug!("Invalidated dataset: {}", dataset);
    }

    /// Invalidate and load a dataset again
    pub async fn reload(&self, dataset: &str) -> Result<Arc<Vec<PointOfInterest>>, CacheError> {
        self.invalidate(dataset).await;
        self.get(dataset).await
    }

    pub fn contains(&self, dataset: &str) -> bool {
        self.datasets.contains_key(dataset)
    }
}
