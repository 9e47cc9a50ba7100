//! View controller: owns grid state and mediates rendering-surface events.

use crate::edit::EditOverlay;
use crate::error::CatalogError;
use crate::export::ExportSurface;
use crate::fields::FieldValue;
use crate::models::{ProductId, ProductRecord};
use crate::query::{self, ViewState};
use crate::store::RecordStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Complete grid state. Transitions return a new value and leave `self` as is.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    store: RecordStore,
    view_state: ViewState,
    edit: EditOverlay,
}

impl CatalogState {
    /// Fresh state over `store` with no edit target.
    pub fn new(store: RecordStore, view_state: ViewState) -> Self {
        Self {
            store,
            view_state,
            edit: EditOverlay::default(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn edit_target(&self) -> Option<ProductId> {
        self.edit.current_edit_target()
    }

    /// Replace the view state wholesale.
    pub fn with_view_state(&self, view_state: ViewState) -> Self {
        Self {
            view_state,
            ..self.clone()
        }
    }

    /// Put `id` in edit mode. Reselecting the current target changes nothing.
    pub fn with_row_selected(&self, id: ProductId) -> Self {
        let mut edit = self.edit;
        edit.begin_edit(id);
        Self {
            edit,
            ..self.clone()
        }
    }

    /// Apply `field = value` to record `id`.
    ///
    /// # Errors
    /// Propagates [`EditOverlay::apply_field_change`] failures; `self` is
    /// untouched in that case.
    pub fn with_field_edited(
        &self,
        id: ProductId,
        field: &str,
        value: Option<FieldValue>,
    ) -> Result<Self, CatalogError> {
        let store = self
            .edit
            .apply_field_change(&self.store, id, field, value)?;
        Ok(Self {
            store,
            ..self.clone()
        })
    }

    /// Evaluate the view state and annotate each visible record with its edit flag.
    pub fn current_page(&self) -> GridPage {
        let result = query::evaluate(self.store.all(), &self.view_state);
        let rows = result
            .page
            .into_iter()
            .map(|record| GridRow {
                in_edit: self.edit.is_editing(record.product_id),
                record,
            })
            .collect();
        GridPage {
            rows,
            total_matched: result.total_matched,
            view_state: self.view_state.clone(),
        }
    }
}

/// One visible row.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub record: Arc<ProductRecord>,
    /// True only for the current edit target.
    pub in_edit: bool,
}

/// Everything the rendering surface needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    pub rows: Vec<GridRow>,
    pub total_matched: usize,
    pub view_state: ViewState,
}

impl GridPage {
    pub fn page_count(&self) -> usize {
        query::page_count(self.total_matched, self.view_state.take)
    }

    /// Zero-based index of the page that starts at `skip`.
    pub fn page_index(&self) -> usize {
        match self.view_state.take {
            0 => 0,
            take => self.view_state.skip / take,
        }
    }
}

/// Callbacks emitted by the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    ViewStateChanged(ViewState),
    RowSelected(ProductId),
    FieldEdited {
        id: ProductId,
        field: String,
        value: Option<FieldValue>,
    },
    ExportRequested,
}

/// Result of an export request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The record set was handed to the bound surface.
    Dispatched,
    /// No surface is bound; nothing happened.
    NotReady,
}

/// Owns the current [`CatalogState`] and the optional export surface.
pub struct ViewController {
    state: CatalogState,
    export: Option<Box<dyn ExportSurface>>,
}

impl std::fmt::Debug for ViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewController")
            .field("state", &self.state)
            .field("export_ready", &self.export_ready())
            .finish()
    }
}

impl ViewController {
    pub fn new(state: CatalogState) -> Self {
        Self {
            state,
            export: None,
        }
    }

    /// Controller over `store` showing the first page of `page_size` rows.
    pub fn from_store(store: RecordStore, page_size: usize) -> Self {
        Self::new(CatalogState::new(store, ViewState::with_page_size(page_size)))
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn edit_target(&self) -> Option<ProductId> {
        self.state.edit_target()
    }

    pub fn on_view_state_changed(&mut self, view_state: ViewState) {
        debug!(
            skip = view_state.skip,
            take = view_state.take,
            sort_keys = view_state.sort.len(),
            filters = view_state.filter.filters.len(),
            "view state replaced"
        );
        self.state = self.state.with_view_state(view_state);
    }

    pub fn on_row_selected(&mut self, id: ProductId) {
        self.state = self.state.with_row_selected(id);
    }

    /// Apply an inline edit. Rejected edits are logged and leave state unchanged.
    pub fn on_field_edited(&mut self, id: ProductId, field: &str, value: Option<FieldValue>) {
        match self.state.with_field_edited(id, field, value) {
            Ok(next) => {
                debug!(product_id = id, field, "field edited");
                self.state = next;
            }
            Err(err) => warn!(product_id = id, field, error = %err, "edit rejected"),
        }
    }

    /// Dispatch one rendering-surface event.
    pub fn handle(&mut self, event: GridEvent) {
        match event {
            GridEvent::ViewStateChanged(view_state) => self.on_view_state_changed(view_state),
            GridEvent::RowSelected(id) => self.on_row_selected(id),
            GridEvent::FieldEdited { id, field, value } => {
                self.on_field_edited(id, &field, value)
            }
            GridEvent::ExportRequested => {
                self.export_pdf();
            }
        }
    }

    pub fn current_page(&self) -> GridPage {
        self.state.current_page()
    }

    /// Bind the export surface at mount. A previously bound surface is closed.
    pub fn bind_export_surface(&mut self, surface: Box<dyn ExportSurface>) {
        if let Some(previous) = self.export.replace(surface) {
            debug!("export surface rebound; closing previous surface");
            previous.close();
        }
    }

    /// Clear the export surface at unmount and hand it back for teardown.
    pub fn unbind_export_surface(&mut self) -> Option<Box<dyn ExportSurface>> {
        self.export.take()
    }

    pub fn export_ready(&self) -> bool {
        self.export.is_some()
    }

    /// Send the full, unpaginated record set to the bound export surface.
    pub fn export_pdf(&self) -> ExportOutcome {
        let Some(surface) = self.export.as_deref() else {
            debug!("export skipped: no export surface bound");
            return ExportOutcome::NotReady;
        };
        // Exports the current snapshot, so inline edits are included.
        let records = self.state.store().all();
        info!(records = records.len(), "export dispatched");
        surface.save(records);
        ExportOutcome::Dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{CompositeFilter, FilterOperator, FilterPredicate, SortDescriptor};
    use crate::test_support::{priced, sample_catalog};
    use rust_decimal::Decimal;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn controller() -> ViewController {
        let store = RecordStore::new(sample_catalog()).expect("store");
        ViewController::from_store(store, 20)
    }

    #[derive(Default)]
    struct Recorded {
        saves: RefCell<Vec<Vec<ProductId>>>,
        last_names: RefCell<Vec<String>>,
        closed: Cell<bool>,
    }

    struct RecordingSurface(Rc<Recorded>);

    impl ExportSurface for RecordingSurface {
        fn save(&self, records: &[Arc<ProductRecord>]) {
            self.0
                .saves
                .borrow_mut()
                .push(records.iter().map(|record| record.product_id).collect());
            *self.0.last_names.borrow_mut() = records
                .iter()
                .map(|record| record.product_name.clone().unwrap_or_default())
                .collect();
        }

        fn close(self: Box<Self>) {
            self.0.closed.set(true);
        }
    }

    fn edit_flags(page: &GridPage) -> Vec<ProductId> {
        page.rows
            .iter()
            .filter(|row| row.in_edit)
            .map(|row| row.record.product_id)
            .collect()
    }

    #[test]
    fn reselecting_a_row_keeps_it_in_edit_mode() {
        let mut controller = controller();
        controller.on_row_selected(1);
        controller.on_row_selected(1);
        assert_eq!(controller.edit_target(), Some(1));
        assert_eq!(edit_flags(&controller.current_page()), vec![1]);
    }

    #[test]
    fn at_most_one_row_is_flagged_for_any_selection_sequence() {
        let mut controller = controller();
        assert!(edit_flags(&controller.current_page()).is_empty());
        for id in [3, 5, 5, 8, 1, 404, 2] {
            controller.on_row_selected(id);
            let flags = edit_flags(&controller.current_page());
            assert!(flags.len() <= 1, "flags after selecting {}: {:?}", id, flags);
            if id == 404 {
                assert!(flags.is_empty());
            } else {
                assert_eq!(flags, vec![id]);
            }
        }
    }

    #[test]
    fn field_edit_updates_only_the_target_field() {
        let store = RecordStore::new(vec![priced(1, 10), priced(2, 5)]).expect("store");
        let mut controller = ViewController::from_store(store, 20);
        let before = controller.state().store().all().to_vec();

        controller.on_field_edited(2, "UnitPrice", Some(FieldValue::Integer(99)));

        let after = controller.state().store().all();
        assert_eq!(after.len(), 2);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].unit_price, Some(Decimal::from(99)));
        assert_eq!(
            ProductRecord {
                unit_price: before[1].unit_price,
                ..after[1].as_ref().clone()
            },
            *before[1]
        );
    }

    #[test]
    fn rejected_edits_leave_state_unchanged() {
        let mut controller = controller();
        let before = controller.state().clone();
        controller.on_field_edited(1, "UnitPrice", Some("lots".into()));
        controller.on_field_edited(1, "Category.CategoryName", Some("Tools".into()));
        controller.on_field_edited(1, "Nope", None);
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn edits_are_visible_on_the_next_page() {
        let mut controller = controller();
        controller.on_view_state_changed(ViewState {
            skip: 0,
            take: 1,
            sort: vec![SortDescriptor::desc("UnitPrice")],
            filter: CompositeFilter::default(),
        });
        let first = controller.current_page();
        assert_eq!(first.rows[0].record.product_id, 8);

        controller.handle(GridEvent::FieldEdited {
            id: 3,
            field: "UnitPrice".to_string(),
            value: Some(FieldValue::Integer(500)),
        });
        let next = controller.current_page();
        assert_eq!(next.rows[0].record.product_id, 3);
        assert_eq!(first.rows[0].record.product_id, 8);
    }

    #[test]
    fn view_state_is_replaced_wholesale() {
        let mut controller = controller();
        controller.handle(GridEvent::ViewStateChanged(ViewState {
            skip: 2,
            take: 3,
            sort: vec![SortDescriptor::asc("ProductName")],
            filter: CompositeFilter::default(),
        }));
        let filtered = ViewState {
            filter: CompositeFilter::and(vec![FilterPredicate::new(
                "Discontinued",
                FilterOperator::Eq,
                true,
            )
            .into()]),
            ..ViewState::with_page_size(10)
        };
        controller.handle(GridEvent::ViewStateChanged(filtered.clone()));

        let page = controller.current_page();
        assert_eq!(page.view_state, filtered);
        assert_eq!(page.total_matched, 2);
        assert_eq!(page.page_count(), 1);
        assert_eq!(page.page_index(), 0);
    }

    #[test]
    fn grid_page_reports_pager_position() {
        let mut controller = controller();
        controller.on_view_state_changed(ViewState {
            skip: 6,
            ..ViewState::with_page_size(3)
        });
        let page = controller.current_page();
        assert_eq!(page.total_matched, 8);
        assert_eq!(page.page_count(), 3);
        assert_eq!(page.page_index(), 2);
        assert_eq!(page.rows.len(), 2);
    }

    #[test]
    fn export_without_surface_is_not_ready() {
        let controller = controller();
        assert!(!controller.export_ready());
        assert_eq!(controller.export_pdf(), ExportOutcome::NotReady);
    }

    #[test]
    fn export_sends_the_full_unpaginated_snapshot() {
        let recorded = Rc::new(Recorded::default());
        let mut controller = controller();
        controller.on_view_state_changed(ViewState::with_page_size(2));
        controller.on_field_edited(4, "ProductName", Some("Gumbo".into()));
        controller.bind_export_surface(Box::new(RecordingSurface(recorded.clone())));

        assert!(controller.export_ready());
        assert_eq!(controller.export_pdf(), ExportOutcome::Dispatched);
        controller.handle(GridEvent::ExportRequested);

        let saves = recorded.saves.borrow();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0], vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(recorded.last_names.borrow()[3], "Gumbo");
    }

    #[test]
    fn unbind_and_rebind_manage_surface_lifecycle() {
        let first = Rc::new(Recorded::default());
        let second = Rc::new(Recorded::default());
        let mut controller = controller();

        controller.bind_export_surface(Box::new(RecordingSurface(first.clone())));
        controller.bind_export_surface(Box::new(RecordingSurface(second.clone())));
        assert!(first.closed.get());
        assert!(!second.closed.get());

        let surface = controller.unbind_export_surface().expect("bound surface");
        assert!(!controller.export_ready());
        assert_eq!(controller.export_pdf(), ExportOutcome::NotReady);
        surface.close();
        assert!(second.closed.get());
        assert!(second.saves.borrow().is_empty());
    }
}
