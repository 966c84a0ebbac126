//! Static course data shown when the backend is unreachable or has no
//! published courses yet.

use crate::types::Catalog;
use serde_json::Value;
use tracing::warn;

const SEED_ROWS: &str = include_str!("../data/seed_courses.json");

/// Raw seed rows, in the same shape the `courses` table returns.
pub fn seed_rows() -> Vec<Value> {
    crate::normalize::parse_rows(SEED_ROWS).unwrap_or_else(|e| {
        warn!("Bundled seed catalog is unreadable: {}", e);
        Vec::new()
    })
}

/// The bundled fallback catalog.
pub fn seed_catalog() -> Catalog {
    Catalog::from_rows(&seed_rows())
}
