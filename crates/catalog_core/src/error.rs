//! Application error types for catalog data and export logic.
use thiserror::Error;

use crate::fields::FieldKind;
use crate::models::ProductId;

/// Top-level catalog error type.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Seed data error: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate product id {0} in seed data")]
    DuplicateProductId(ProductId),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field is read-only: {0}")]
    ReadOnlyField(&'static str),

    #[error("Field {field} expects a {expected} value")]
    FieldType {
        field: &'static str,
        expected: FieldKind,
    },

    #[error("Export failed: {0}")]
    Export(String),
}
