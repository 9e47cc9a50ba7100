//! PDF export: paper settings, document layout, and the export surface seam.

/// Minimal PDF writer for tabular documents.
pub mod pdf;
mod worker;

pub use worker::{spawn_pdf_export, PdfExportHandle};

use crate::constants::EXPORT_DOCUMENT_TITLE;
use crate::display::{cell_text, GRID_COLUMNS};
use crate::models::ProductRecord;
use std::sync::Arc;

const POINTS_PER_CM: f32 = 72.0 / 2.54;

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    A4,
    Letter,
}

impl PaperSize {
    /// Portrait width and height in PDF points.
    pub fn portrait_points(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (595.28, 841.89),
            PaperSize::Letter => (612.0, 792.0),
        }
    }
}

/// Fixed page setup applied to every export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperConfig {
    pub size: PaperSize,
    pub landscape: bool,
    pub margin_cm: f32,
    /// Content scale factor; 0.5 renders text and rows at half size.
    pub scale: f32,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            size: PaperSize::A4,
            landscape: true,
            margin_cm: 1.0,
            scale: 0.5,
        }
    }
}

impl PaperConfig {
    /// Page width and height in points after orientation.
    pub fn page_points(&self) -> (f32, f32) {
        let (width, height) = self.size.portrait_points();
        if self.landscape {
            (height, width)
        } else {
            (width, height)
        }
    }

    pub fn margin_points(&self) -> f32 {
        self.margin_cm * POINTS_PER_CM
    }
}

/// Tabular content of an export, laid out like the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub title: String,
    pub headers: Vec<String>,
    /// Relative column widths, one per header.
    pub weights: Vec<f32>,
    pub rows: Vec<Vec<String>>,
}

impl ExportDocument {
    /// Lay out `records` with the grid's columns, in the given order.
    pub fn from_records(records: &[Arc<ProductRecord>]) -> Self {
        Self {
            title: EXPORT_DOCUMENT_TITLE.to_string(),
            headers: GRID_COLUMNS
                .iter()
                .map(|column| column.title.to_string())
                .collect(),
            weights: GRID_COLUMNS.iter().map(|column| column.weight).collect(),
            rows: records
                .iter()
                .map(|record| {
                    GRID_COLUMNS
                        .iter()
                        .map(|column| cell_text(record, column))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Destination for exports of the full record set.
///
/// `save` is fire-and-forget: implementations report failures through logging
/// only and callers never observe completion.
pub trait ExportSurface {
    fn save(&self, records: &[Arc<ProductRecord>]);

    /// Release the surface at unmount. The default just drops it.
    fn close(self: Box<Self>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;

    #[test]
    fn default_paper_is_a4_landscape_half_scale() {
        let paper = PaperConfig::default();
        assert_eq!(paper.page_points(), (841.89, 595.28));
        assert!((paper.margin_points() - 28.346).abs() < 0.01);
        assert_eq!(paper.scale, 0.5);
    }

    #[test]
    fn letter_orientation_swaps_dimensions() {
        let portrait = PaperConfig {
            size: PaperSize::Letter,
            landscape: false,
            ..PaperConfig::default()
        };
        assert_eq!(portrait.page_points(), (612.0, 792.0));
        let landscape = PaperConfig {
            landscape: true,
            ..portrait
        };
        assert_eq!(landscape.page_points(), (792.0, 612.0));
    }

    #[test]
    fn document_mirrors_grid_columns() {
        let records: Vec<Arc<ProductRecord>> =
            sample_catalog().into_iter().map(Arc::new).collect();
        let document = ExportDocument::from_records(&records);
        assert_eq!(
            document.headers,
            vec!["ID", "Name", "Category", "Price", "In stock", "Discontinued"]
        );
        assert_eq!(document.weights.len(), document.headers.len());
        assert_eq!(document.rows.len(), records.len());
        assert_eq!(
            document.rows[0],
            vec!["1", "Chai", "Beverages", "18.00", "39", "No"]
        );
    }
}
