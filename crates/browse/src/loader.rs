//! Catalog loading.
//!
//! Rows come from a `CourseSource`. Whatever happens on the way, the view
//! always ends up with something to show: a failed fetch or a catalog with
//! no published courses falls back to the bundled seed catalog.

use async_trait::async_trait;
use catalog::{Catalog, CatalogError};
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Where course rows come from.
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Name for logging
    fn name(&self) -> &str;

    /// Fetch raw backend rows, in either row shape.
    async fn fetch_rows(&self) -> catalog::Result<Vec<Value>>;
}

/// Rows stored as a JSON array (or `{"data": [...]}` envelope) on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CourseSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn fetch_rows(&self) -> catalog::Result<Vec<Value>> {
        debug!("Reading course rows from {:?}", self.path);
        let json = tokio::fs::read_to_string(&self.path).await?;
        catalog::parse_rows(&json)
    }
}

/// The bundled seed rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSource;

#[async_trait]
impl CourseSource for SeedSource {
    fn name(&self) -> &str {
        "seed"
    }

    async fn fetch_rows(&self) -> catalog::Result<Vec<Value>> {
        Ok(catalog::seed_rows())
    }
}

/// Fetch and normalize a catalog, falling back to the seed catalog.
///
/// Steps:
/// 1. Fetch rows from `source`
/// 2. Normalize them off the async runtime (normalization fans out on rayon)
/// 3. Fall back to the seed catalog on any failure, or when nothing published
///    came back
pub async fn load_catalog(source: &dyn CourseSource) -> Arc<Catalog> {
    let start_time = Instant::now();

    let catalog = match build(source).await {
        Ok(catalog) if !catalog.is_empty() => catalog,
        Ok(_) => {
            warn!("Source {} returned no published courses, using seed catalog", source.name());
            catalog::seed_catalog()
        }
        Err(e) => {
            warn!("Failed to load courses from {}: {}; using seed catalog", source.name(), e);
            catalog::seed_catalog()
        }
    };

    info!(
        "Loaded {} courses from {} in {:.2?}",
        catalog.len(),
        source.name(),
        start_time.elapsed()
    );
    Arc::new(catalog)
}

async fn build(source: &dyn CourseSource) -> catalog::Result<Catalog> {
    let rows = source.fetch_rows().await?;
    tokio::task::spawn_blocking(move || Catalog::from_rows(&rows))
        .await
        .map_err(|e| CatalogError::Fetch(format!("normalization task failed: {e}")))
}

/// Lifetime of a view that owns an in-flight load.
///
/// Work run through `guard` is dropped once the view unmounts, and its result
/// is discarded even if it had already finished.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear the view down. Pending guarded work is abandoned.
    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// A scope that unmounts with this one but can also unmount on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Run `work` unless the view unmounts first.
    pub async fn guard<F>(&self, work: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!("View unmounted, discarding result");
                None
            }
            output = work => {
                if self.is_mounted() { Some(output) } else { None }
            }
        }
    }
}

/// `load_catalog`, tied to the lifetime of `scope`.
pub async fn load_catalog_in(source: &dyn CourseSource, scope: &ViewScope) -> Option<Arc<Catalog>> {
    scope.guard(load_catalog(source)).await
}
