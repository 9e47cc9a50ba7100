//! Core domain library for the product catalog (records, view queries, edits, export).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across catalog crates.
pub mod constants;
/// View controller that owns grid state and mediates user events.
pub mod controller;
/// Column layout and cell formatting shared by the grid and PDF export.
pub mod display;
/// Single-target inline edit tracking.
pub mod edit;
/// Application error types.
pub mod error;
/// PDF export surface, document layout, and background worker.
pub mod export;
/// Typed field registry for product attributes.
pub mod fields;
/// Product and category data models.
pub mod models;
/// In-memory filter/sort/page evaluation.
pub mod query;
/// Seed data loading.
pub mod seed;
/// Copy-on-write record store.
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use controller::{CatalogState, ExportOutcome, GridEvent, GridPage, GridRow, ViewController};
pub use export::{spawn_pdf_export, ExportSurface, PaperConfig, PdfExportHandle};
pub use error::CatalogError;
pub use models::{Category, ProductId, ProductRecord};
pub use query::{evaluate, QueryResult, ViewState};
pub use store::RecordStore;
