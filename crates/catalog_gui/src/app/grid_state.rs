//! UI-side grid state: filter inputs, sort cycling, pager math, and edit drafts.
//!
//! Everything here is pure so it can be unit tested without an egui context.

use catalog_core::display::{editor_text, GRID_COLUMNS};
use catalog_core::fields::{self, FieldValue};
use catalog_core::query::{
    page_count, CompositeFilter, FilterNode, FilterOperator, FilterPredicate, SortDescriptor,
    SortDirection, ViewState,
};
use catalog_core::{GridPage, ProductId, ProductRecord};
use tracing::debug;

/// Next sort for a header click: none, then ascending, then descending, then none.
///
/// Clicking a different column starts over with that column ascending.
pub(crate) fn cycle_sort(current: &[SortDescriptor], field: &str) -> Vec<SortDescriptor> {
    match current.iter().find(|sort| sort.field == field).map(|sort| sort.dir) {
        None => vec![SortDescriptor::asc(field)],
        Some(SortDirection::Asc) => vec![SortDescriptor::desc(field)],
        Some(SortDirection::Desc) => Vec::new(),
    }
}

pub(crate) fn sort_indicator(current: &[SortDescriptor], field: &str) -> &'static str {
    match current.iter().find(|sort| sort.field == field).map(|sort| sort.dir) {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => "",
    }
}

/// Three-way boolean filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum TriState {
    #[default]
    Any,
    Yes,
    No,
}

impl TriState {
    pub(crate) fn next(self) -> Self {
        match self {
            TriState::Any => TriState::Yes,
            TriState::Yes => TriState::No,
            TriState::No => TriState::Any,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            TriState::Any => "Any",
            TriState::Yes => "Yes",
            TriState::No => "No",
        }
    }
}

/// Contents of the filter row, one input per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FilterInputs {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) price: String,
    pub(crate) in_stock: String,
    pub(crate) discontinued: TriState,
}

impl FilterInputs {
    /// Text input backing `field`, if the column filters by text.
    pub(crate) fn input_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "ProductID" => Some(&mut self.id),
            "ProductName" => Some(&mut self.name),
            "Category.CategoryName" => Some(&mut self.category),
            "UnitPrice" => Some(&mut self.price),
            "UnitsInStock" => Some(&mut self.in_stock),
            _ => None,
        }
    }

    /// `and` of every non-blank input: `contains` for text columns, `eq` for
    /// numeric ones.
    pub(crate) fn to_filter(&self) -> CompositeFilter {
        let mut filters: Vec<FilterNode> = Vec::new();
        for (field, input) in [
            ("ProductID", &self.id),
            ("ProductName", &self.name),
            ("Category.CategoryName", &self.category),
            ("UnitPrice", &self.price),
            ("UnitsInStock", &self.in_stock),
        ] {
            let input = input.trim();
            if input.is_empty() {
                continue;
            }
            let operator = match fields::lookup(field).map(|spec| spec.kind) {
                Some(fields::FieldKind::Text) => FilterOperator::Contains,
                _ => FilterOperator::Eq,
            };
            filters.push(FilterPredicate::new(field, operator, input).into());
        }
        match self.discontinued {
            TriState::Any => {}
            TriState::Yes => {
                filters.push(FilterPredicate::new("Discontinued", FilterOperator::Eq, true).into())
            }
            TriState::No => {
                filters.push(FilterPredicate::new("Discontinued", FilterOperator::Eq, false).into())
            }
        }
        CompositeFilter::and(filters)
    }
}

/// Same view with a new filter, back on the first page.
pub(crate) fn with_filter(view_state: &ViewState, filter: CompositeFilter) -> ViewState {
    ViewState {
        skip: 0,
        filter,
        ..view_state.clone()
    }
}

/// Pager buttons and the page-size picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PagerAction {
    First,
    Previous,
    Next,
    Last,
    PageSize(usize),
}

/// View state after a pager interaction over `total` matched records.
pub(crate) fn apply_pager(view_state: &ViewState, total: usize, action: PagerAction) -> ViewState {
    let take = view_state.take.max(1);
    let last_skip = page_count(total, take).saturating_sub(1) * take;
    let (skip, take) = match action {
        PagerAction::First => (0, take),
        PagerAction::Previous => (view_state.skip.saturating_sub(take), take),
        PagerAction::Next => ((view_state.skip + take).min(last_skip), take),
        PagerAction::Last => (last_skip, take),
        // Keep the first visible row on screen.
        PagerAction::PageSize(size) => {
            let size = size.max(1);
            ((view_state.skip / size) * size, size)
        }
    };
    ViewState {
        skip,
        take,
        ..view_state.clone()
    }
}

/// Editor text for the row in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditDraft {
    pub(crate) id: ProductId,
    name: String,
    price: String,
    in_stock: String,
}

impl EditDraft {
    pub(crate) fn from_record(record: &ProductRecord) -> Self {
        let text = |field: &str| {
            GRID_COLUMNS
                .iter()
                .find(|column| column.field == field)
                .map(|column| editor_text(record, column))
                .unwrap_or_default()
        };
        Self {
            id: record.product_id,
            name: text("ProductName"),
            price: text("UnitPrice"),
            in_stock: text("UnitsInStock"),
        }
    }

    pub(crate) fn text_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "ProductName" => Some(&mut self.name),
            "UnitPrice" => Some(&mut self.price),
            "UnitsInStock" => Some(&mut self.in_stock),
            _ => None,
        }
    }
}

/// Parse editor text for `field`. `None` means the text is not a valid value
/// yet and no edit should be sent.
pub(crate) fn parse_edit(field: &str, input: &str) -> Option<Option<FieldValue>> {
    let spec = fields::lookup(field)?;
    match spec.parse_input(input) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(field, input, error = %err, "edit input not applied");
            None
        }
    }
}

/// Per-frame UI state that outlives a single [`GridPage`].
#[derive(Debug, Default)]
pub(crate) struct GridUiState {
    pub(crate) filters: FilterInputs,
    pub(crate) draft: Option<EditDraft>,
}

impl GridUiState {
    /// Reset the draft whenever the edit target changes.
    pub(crate) fn sync_draft(&mut self, page: &GridPage) {
        let Some(row) = page.rows.iter().find(|row| row.in_edit) else {
            return;
        };
        let stale = self
            .draft
            .as_ref()
            .map_or(true, |draft| draft.id != row.record.product_id);
        if stale {
            self.draft = Some(EditDraft::from_record(&row.record));
        }
    }
}
