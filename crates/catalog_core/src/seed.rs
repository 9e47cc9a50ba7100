//! Seed data loading.

use crate::config::Config;
use crate::error::CatalogError;
use crate::models::ProductRecord;
use crate::store::RecordStore;
use std::path::Path;
use tracing::info;

const BUNDLED_PRODUCTS: &str = include_str!("../data/products.json");

/// Parse the product list compiled into the binary.
///
/// # Errors
/// Returns [`CatalogError::Seed`] if the bundled JSON is malformed.
pub fn load_bundled() -> Result<Vec<ProductRecord>, CatalogError> {
    Ok(serde_json::from_str(BUNDLED_PRODUCTS)?)
}

/// Parse a JSON array of products from `path`.
///
/// # Errors
/// Returns [`CatalogError::Io`] when the file cannot be read and
/// [`CatalogError::Seed`] when it is not a product array.
pub fn load_from_path(path: &Path) -> Result<Vec<ProductRecord>, CatalogError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Build the initial store from the configured seed source.
///
/// # Errors
/// Propagates parse and I/O failures plus duplicate-id rejection from
/// [`RecordStore::new`].
pub fn load(config: &Config) -> Result<RecordStore, CatalogError> {
    let (records, source) = match config.seed_path.as_deref() {
        Some(path) => (load_from_path(path)?, path.display().to_string()),
        None => (load_bundled()?, "bundled".to_string()),
    };
    let store = RecordStore::new(records)?;
    info!(source = %source, records = store.len(), "seed loaded");
    Ok(store)
}
