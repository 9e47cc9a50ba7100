//! Product table rendering.

use super::super::grid_state::{cycle_sort, parse_edit, sort_indicator, with_filter, EditDraft};
use super::super::style::COLOR_TEXT_MUTED;
use super::super::CatalogApp;
use catalog_core::display::{category_glyph, cell_text, GridColumn, GRID_COLUMNS};
use catalog_core::fields::FieldValue;
use catalog_core::{GridEvent, GridPage, GridRow, ViewState};
use eframe::egui;
use egui_extras::{Column, TableBuilder};

const HEADER_HEIGHT: f32 = 58.0;
const ROW_HEIGHT: f32 = 28.0;
const COLUMN_UNIT_WIDTH: f32 = 90.0;
const CATEGORY_FIELD: &str = "Category.CategoryName";
const DISCONTINUED_FIELD: &str = "Discontinued";

impl CatalogApp {
    /// Renders the table: sortable headers with the filter row, then one row
    /// per visible record. Clicking a row puts it in edit mode.
    pub(crate) fn render_grid(
        &mut self,
        ctx: &egui::Context,
        page: &GridPage,
        events: &mut Vec<GridEvent>,
    ) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let filters = &mut self.grid.filters;
            let draft = &mut self.grid.draft;
            let mut sort_clicked = None;
            let mut filter_changed = false;

            let mut table = TableBuilder::new(ui)
                .striped(true)
                .sense(egui::Sense::click())
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
            for column in GRID_COLUMNS.iter() {
                table = table.column(
                    Column::initial(column.weight * COLUMN_UNIT_WIDTH)
                        .at_least(48.0)
                        .resizable(true)
                        .clip(true),
                );
            }

            table
                .header(HEADER_HEIGHT, |mut header| {
                    for column in GRID_COLUMNS.iter() {
                        header.col(|ui| {
                            ui.vertical(|ui| {
                                let title = format!(
                                    "{}{}",
                                    column.title,
                                    sort_indicator(&page.view_state.sort, column.field)
                                );
                                let title = egui::Button::new(egui::RichText::new(title).strong())
                                    .frame(false);
                                if ui.add(title).clicked() {
                                    sort_clicked = Some(column.field);
                                }
                                if column.field == DISCONTINUED_FIELD {
                                    let label = filters.discontinued.label();
                                    if ui.small_button(label).clicked() {
                                        filters.discontinued = filters.discontinued.next();
                                        filter_changed = true;
                                    }
                                } else if let Some(input) = filters.input_mut(column.field) {
                                    let edit = egui::TextEdit::singleline(input)
                                        .hint_text("Filter")
                                        .desired_width(f32::INFINITY);
                                    if ui.add(edit).changed() {
                                        filter_changed = true;
                                    }
                                }
                            });
                        });
                    }
                })
                .body(|mut body| {
                    for grid_row in &page.rows {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.set_selected(grid_row.in_edit);
                            for column in GRID_COLUMNS.iter() {
                                row.col(|ui| render_cell(ui, draft, grid_row, column, events));
                            }
                            if row.response().clicked() {
                                events.push(GridEvent::RowSelected(grid_row.record.product_id));
                            }
                        });
                    }
                });

            if page.rows.is_empty() {
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("No products match the current filters.")
                        .color(COLOR_TEXT_MUTED),
                );
            }

            let mut next: ViewState = page.view_state.clone();
            if let Some(field) = sort_clicked {
                next.sort = cycle_sort(&next.sort, field);
            }
            if filter_changed {
                next = with_filter(&next, filters.to_filter());
            }
            if next != page.view_state {
                events.push(GridEvent::ViewStateChanged(next));
            }
        });
    }
}

fn render_cell(
    ui: &mut egui::Ui,
    draft: &mut Option<EditDraft>,
    grid_row: &GridRow,
    column: &GridColumn,
    events: &mut Vec<GridEvent>,
) {
    let record = &grid_row.record;
    let id = record.product_id;
    if grid_row.in_edit && column.editable {
        if column.field == DISCONTINUED_FIELD {
            let mut checked = record.discontinued.unwrap_or(false);
            if ui.checkbox(&mut checked, "").changed() {
                events.push(GridEvent::FieldEdited {
                    id,
                    field: column.field.to_string(),
                    value: Some(FieldValue::Boolean(checked)),
                });
            }
            return;
        }
        let text = draft
            .as_mut()
            .filter(|draft| draft.id == id)
            .and_then(|draft| draft.text_mut(column.field));
        if let Some(text) = text {
            let edit = egui::TextEdit::singleline(text).desired_width(f32::INFINITY);
            if ui.add(edit).changed() {
                if let Some(value) = parse_edit(column.field, text) {
                    events.push(GridEvent::FieldEdited {
                        id,
                        field: column.field.to_string(),
                        value,
                    });
                }
            }
            return;
        }
    }

    let text = if column.field == CATEGORY_FIELD {
        format!(
            "{} {}",
            category_glyph(record.category_name()),
            cell_text(record, column)
        )
    } else {
        cell_text(record, column)
    };
    ui.add(egui::Label::new(text).truncate().selectable(false));
}
