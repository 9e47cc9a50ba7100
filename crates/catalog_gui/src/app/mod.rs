//! egui application shell around the catalog [`ViewController`].

mod grid_state;
mod style;
mod ui;

use catalog_core::controller::ExportOutcome;
use catalog_core::export::{spawn_pdf_export, PaperConfig};
use catalog_core::{seed, CatalogError, Config, GridEvent, ViewController};
use eframe::egui;
use grid_state::GridUiState;
use std::path::PathBuf;
use tracing::{debug, info};

pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1100.0, 720.0];
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [760.0, 480.0];

/// Native window hosting the product grid.
///
/// Each frame renders the controller's current page, collects the grid events
/// raised by widgets, and dispatches them once rendering is done.
pub(crate) struct CatalogApp {
    controller: ViewController,
    grid: GridUiState,
    export_path: Option<PathBuf>,
    export_status: Option<String>,
    style_applied: bool,
}

impl CatalogApp {
    /// Load the seed and mount the export surface according to `config`.
    ///
    /// # Errors
    /// Returns seed load failures and export worker spawn failures.
    pub(crate) fn new(config: &Config) -> Result<Self, CatalogError> {
        let store = seed::load(config)?;
        let mut controller = ViewController::from_store(store, config.page_size);
        let export_path = if config.export_enabled {
            let handle = spawn_pdf_export(config.export_path.clone(), PaperConfig::default())?;
            controller.bind_export_surface(Box::new(handle));
            Some(config.export_path.clone())
        } else {
            info!("pdf export disabled by configuration");
            None
        };
        Ok(Self::from_controller(controller, export_path))
    }

    pub(crate) fn from_controller(controller: ViewController, export_path: Option<PathBuf>) -> Self {
        Self {
            controller,
            grid: GridUiState::default(),
            export_path,
            export_status: None,
            style_applied: false,
        }
    }

    /// Render every panel and apply the events they raised.
    pub(crate) fn render(&mut self, ctx: &egui::Context) {
        self.ensure_style(ctx);
        let page = self.controller.current_page();
        self.grid.sync_draft(&page);

        let mut events = Vec::new();
        self.render_toolbar(ctx, &mut events);
        self.render_pager(ctx, &page, &mut events);
        self.render_grid(ctx, &page, &mut events);
        if !events.is_empty() {
            self.dispatch(events);
            ctx.request_repaint();
        }
    }

    pub(crate) fn dispatch(&mut self, events: Vec<GridEvent>) {
        for event in events {
            if event == GridEvent::ExportRequested {
                self.export_status = Some(match self.controller.export_pdf() {
                    ExportOutcome::Dispatched => match &self.export_path {
                        Some(path) => format!("Exporting to {}", path.display()),
                        None => "Export sent".to_string(),
                    },
                    ExportOutcome::NotReady => "Export unavailable".to_string(),
                });
                continue;
            }
            self.controller.handle(event);
        }
    }

    /// Unbind the export surface and wait for queued exports to finish.
    fn shutdown_export(&mut self) {
        if let Some(surface) = self.controller.unbind_export_surface() {
            debug!("closing export surface");
            surface.close();
        }
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown_export();
    }
}

impl Drop for CatalogApp {
    fn drop(&mut self) {
        self.shutdown_export();
    }
}
