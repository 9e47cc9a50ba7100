//! Root crate facade for the product catalog core and desktop grid.

pub use catalog_core::{
    config, constants, controller, display, edit, error, export, fields, models, query, seed,
    store, CatalogError, CatalogState, Category, Config, ExportOutcome, ExportSurface, GridEvent,
    GridPage, GridRow, PaperConfig, PdfExportHandle, ProductId, ProductRecord, RecordStore,
    ViewController, ViewState,
};

#[cfg(feature = "gui")]
/// Launch the desktop grid (feature-gated).
pub use catalog_gui::run as run_gui;
