//! Desktop grid for the product catalog.
//!
//! Exposes a `run` helper so the workspace root can launch the UI without
//! duplicating initialization logic.

mod app;

use app::CatalogApp;
use catalog_core::Config;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

const APP_TITLE: &str = "Product Catalog";
const DEFAULT_LOG_FILTER: &str = "catalog_core=info,catalog_gui=info";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber installed by the embedding process wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Window setup. Nothing is restored from or saved to disk between runs.
fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title(APP_TITLE),
        persist_window: false,
        ..Default::default()
    }
}

/// Start the catalog UI with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error, including app
/// creation failures when the seed data cannot be loaded or the export worker
/// cannot be started.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let config = Config::from_env();
    info!(
        page_size = config.page_size,
        export_enabled = config.export_enabled,
        export_path = %config.export_path.display(),
        "starting catalog grid"
    );
    let app = CatalogApp::new(&config).map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;

    eframe::run_native(APP_TITLE, native_options(), Box::new(|_cc| Ok(Box::new(app))))
}
