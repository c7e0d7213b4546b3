use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;

use crate::models::PointOfInterest;

/// Errors that can occur while loading a point-of-interest dataset
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid dataset name: {0}")]
    InvalidName(String),

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Supplies points of interest for a named dataset
pub trait PoiSource: Send + Sync + 'static {
    fn load(
        &self,
        dataset: &str,
    ) -> impl Future<Output = Result<Vec<PointOfInterest>, CatalogError>> + Send;
}

/// Reads `<data_dir>/<dataset>.json`, a JSON array of points
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    data_dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl PoiSource for JsonFileSource {
    async fn load(&self, dataset: &str) -> Result<Vec<PointOfInterest>, CatalogError> {
        validate_dataset_name(dataset)?;

        let path = self.data_dir.join(format!("{}.json", dataset));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(dataset.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let points: Vec<PointOfInterest> = serde_json::from_slice(&bytes)?;
        tracing::debug!("Read {} points from {}", points.len(), path.display());

        Ok(sanitize_points(dataset, points))
    }
}

/// In-memory datasets, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    datasets: std::collections::HashMap<String, Vec<PointOfInterest>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, name: impl Into<String>, points: Vec<PointOfInterest>) -> Self {
        self.datasets.insert(name.into(), points);
        self
    }
}

impl PoiSource for StaticSource {
    async fn load(&self, dataset: &str) -> Result<Vec<PointOfInterest>, CatalogError> {
        let points = self
            .datasets
            .get(dataset)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(dataset.to_string()))?;
        Ok(sanitize_points(dataset, points))
    }
}

/// Dataset names map to file names, so keep them to `[A-Za-z0-9_-]+`
pub fn validate_dataset_name(dataset: &str) -> Result<(), CatalogError> {
    let valid = !dataset.is_empty()
        && dataset
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(CatalogError::InvalidName(dataset.to_string()))
    }
}

/// Drop points the corridor engine must never see: non-finite or
/// out-of-range coordinates, and tier 0
pub fn sanitize_points(dataset: &str, points: Vec<PointOfInterest>) -> Vec<PointOfInterest> {
    let before = points.len();
    let kept: Vec<PointOfInterest> = points
        .into_iter()
        .filter(|p| {
            let ok = p.validate().is_ok();
            if !ok {
                tracing::warn!("Dropping invalid point '{}' ({}, {}) tier {} from {}", p.name, p.lat, p.lon, p.tier, dataset);
            }
            ok
        })
        .collect();

    if kept.len() != before {
        tracing::warn!("Dataset {}: dropped {} of {} points", dataset, before - kept.len(), before);
    }
    kept
}
