//! Top toolbar rendering.

use super::super::style::{COLOR_TEXT_MUTED, COLOR_TEXT_SECONDARY};
use super::super::CatalogApp;
use catalog_core::GridEvent;
use eframe::egui;

impl CatalogApp {
    /// Renders the title and the "Export PDF" button.
    pub(crate) fn render_toolbar(&mut self, ctx: &egui::Context, events: &mut Vec<GridEvent>) {
        egui::TopBottomPanel::top("toolbar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Products");
                    ui.separator();
                    let ready = self.controller.export_ready();
                    let button = ui
                        .add_enabled(ready, egui::Button::new("Export PDF"))
                        .on_disabled_hover_text("PDF export is disabled");
                    if button.clicked() {
                        events.push(GridEvent::ExportRequested);
                    }
                    if let Some(status) = &self.export_status {
                        ui.label(egui::RichText::new(status).small().color(COLOR_TEXT_SECONDARY));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let total = self.controller.state().store().len();
                        ui.label(
                            egui::RichText::new(format!("{} products", total))
                                .small()
                                .color(COLOR_TEXT_MUTED),
                        );
                    });
                });
            });
    }
}
