//! Bottom pager rendering.

use super::super::grid_state::{apply_pager, PagerAction};
use super::super::style::COLOR_TEXT_MUTED;
use super::super::CatalogApp;
use catalog_core::constants::PAGE_SIZE_CHOICES;
use catalog_core::{GridEvent, GridPage};
use eframe::egui;

impl CatalogApp {
    /// Renders page navigation, the page-size picker, and the item range.
    pub(crate) fn render_pager(
        &mut self,
        ctx: &egui::Context,
        page: &GridPage,
        events: &mut Vec<GridEvent>,
    ) {
        let page_count = page.page_count();
        let page_index = page.page_index();
        let mut action = None;

        egui::TopBottomPanel::bottom("pager")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let has_previous = page_index > 0;
                    let has_next = page_index + 1 < page_count;
                    if ui.add_enabled(has_previous, egui::Button::new("«")).clicked() {
                        action = Some(PagerAction::First);
                    }
                    if ui.add_enabled(has_previous, egui::Button::new("‹")).clicked() {
                        action = Some(PagerAction::Previous);
                    }
                    ui.label(format!(
                        "Page {} of {}",
                        if page_count == 0 { 0 } else { page_index + 1 },
                        page_count
                    ));
                    if ui.add_enabled(has_next, egui::Button::new("›")).clicked() {
                        action = Some(PagerAction::Next);
                    }
                    if ui.add_enabled(has_next, egui::Button::new("»")).clicked() {
                        action = Some(PagerAction::Last);
                    }

                    ui.separator();
                    let mut take = page.view_state.take;
                    egui::ComboBox::from_id_salt("page_size")
                        .selected_text(format!("{} per page", take))
                        .show_ui(ui, |ui| {
                            for size in PAGE_SIZE_CHOICES {
                                ui.selectable_value(&mut take, size, size.to_string());
                            }
                        });
                    if take != page.view_state.take {
                        action = Some(PagerAction::PageSize(take));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let first = page.view_state.skip + 1;
                        let last = page.view_state.skip + page.rows.len();
                        let range = if page.rows.is_empty() {
                            format!("0 of {} items", page.total_matched)
                        } else {
                            format!("{} - {} of {} items", first, last, page.total_matched)
                        };
                        ui.label(egui::RichText::new(range).small().color(COLOR_TEXT_MUTED));
                    });
                });
            });

        if let Some(action) = action {
            let next = apply_pager(&page.view_state, page.total_matched, action);
            if next != page.view_state {
                events.push(GridEvent::ViewStateChanged(next));
            }
        }
    }
}
