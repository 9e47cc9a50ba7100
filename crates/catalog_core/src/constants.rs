//! Shared constants used across catalog crates.

/// Default page size for the grid when no override is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page sizes offered by the pager.
pub const PAGE_SIZE_CHOICES: [usize; 3] = [10, 20, 50];

/// Glyph shown for categories without a dedicated emoji.
pub const PLACEHOLDER_GLYPH: &str = "❓";

/// Default file name for PDF exports.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "products.pdf";

/// Document title written into exported PDFs.
pub const EXPORT_DOCUMENT_TITLE: &str = "Products";

/// Environment variable naming an alternate JSON seed file.
pub const ENV_SEED_PATH: &str = "CATALOG_SEED_PATH";
/// Environment variable overriding the initial page size.
pub const ENV_PAGE_SIZE: &str = "CATALOG_PAGE_SIZE";
/// Environment variable overriding the PDF output path.
pub const ENV_EXPORT_PATH: &str = "CATALOG_EXPORT_PATH";
/// Environment flag controlling whether the export surface is mounted.
pub const ENV_EXPORT_ENABLED: &str = "CATALOG_EXPORT_ENABLED";
