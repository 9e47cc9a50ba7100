//! Column layout and cell formatting shared by the grid and PDF export.

use crate::constants::PLACEHOLDER_GLYPH;
use crate::fields::{self, FieldSpec};
use crate::models::ProductRecord;

/// One visible grid column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridColumn {
    /// Registry field name backing the column.
    pub field: &'static str,
    /// Header text.
    pub title: &'static str,
    /// Whether the row in edit mode renders an input for this column.
    pub editable: bool,
    /// Relative width used by fixed layouts such as the PDF table.
    pub weight: f32,
}

impl GridColumn {
    /// Registry entry for this column's field.
    pub fn spec(&self) -> Option<&'static FieldSpec> {
        fields::lookup(self.field)
    }
}

/// Columns shown by the grid, in display order.
pub const GRID_COLUMNS: [GridColumn; 6] = [
    GridColumn {
        field: "ProductID",
        title: "ID",
        editable: false,
        weight: 0.6,
    },
    GridColumn {
        field: "ProductName",
        title: "Name",
        editable: true,
        weight: 3.0,
    },
    GridColumn {
        field: "Category.CategoryName",
        title: "Category",
        editable: false,
        weight: 1.8,
    },
    GridColumn {
        field: "UnitPrice",
        title: "Price",
        editable: true,
        weight: 1.0,
    },
    GridColumn {
        field: "UnitsInStock",
        title: "In stock",
        editable: true,
        weight: 1.0,
    },
    GridColumn {
        field: "Discontinued",
        title: "Discontinued",
        editable: true,
        weight: 1.2,
    },
];

const CATEGORY_GLYPHS: [(&str, &str); 8] = [
    ("Beverages", "🍹"),
    ("Condiments", "🥫"),
    ("Confections", "🍬"),
    ("Dairy Products", "🥛"),
    ("Grains/Cereals", "🌾"),
    ("Meat/Poultry", "🍗"),
    ("Produce", "🥕"),
    ("Seafood", "🐟"),
];

/// Emoji for a category name; unknown or missing names get the placeholder.
pub fn category_glyph(name: Option<&str>) -> &'static str {
    name.and_then(|name| {
        CATEGORY_GLYPHS
            .iter()
            .find(|(category, _)| *category == name)
            .map(|(_, glyph)| *glyph)
    })
    .unwrap_or(PLACEHOLDER_GLYPH)
}

/// Plain-text rendering of one cell.
///
/// Prices use two decimals and booleans render as `Yes`/`No`; missing values
/// are blank.
pub fn cell_text(record: &ProductRecord, column: &GridColumn) -> String {
    match column.field {
        "UnitPrice" => record
            .unit_price
            .map(|price| format!("{:.2}", price))
            .unwrap_or_default(),
        "Discontinued" => match record.discontinued {
            Some(true) => "Yes".to_string(),
            Some(false) => "No".to_string(),
            None => String::new(),
        },
        _ => column
            .spec()
            .and_then(|spec| spec.value(record))
            .map(|value| value.to_string())
            .unwrap_or_default(),
    }
}

/// Text used to seed an inline editor for `column`.
pub fn editor_text(record: &ProductRecord, column: &GridColumn) -> String {
    column
        .spec()
        .and_then(|spec| spec.value(record))
        .map(|value| value.to_string())
        .unwrap_or_default()
}
