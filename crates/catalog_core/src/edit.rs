//! Single-target inline edit tracking.

use crate::error::CatalogError;
use crate::fields::{self, FieldValue};
use crate::models::ProductId;
use crate::store::RecordStore;
use tracing::debug;

/// Tracks which record, if any, is open for inline editing.
///
/// Only one record is in edit mode at a time. There is no exit transition:
/// once a row has been selected some row stays in edit mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOverlay {
    target: Option<ProductId>,
}

impl EditOverlay {
    /// Make `id` the edit target, replacing any prior target.
    pub fn begin_edit(&mut self, id: ProductId) {
        if self.target != Some(id) {
            debug!(product_id = id, previous = ?self.target, "edit target changed");
        }
        self.target = Some(id);
    }

    pub fn current_edit_target(&self) -> Option<ProductId> {
        self.target
    }

    /// Whether `id` is the current edit target.
    pub fn is_editing(&self, id: ProductId) -> bool {
        self.target == Some(id)
    }

    /// Write `field = value` into the record matching `id`.
    ///
    /// The record is copied, the field set on the copy, and the copy written
    /// back through [`RecordStore::replace`]. A missing id returns an unchanged
    /// snapshot.
    ///
    /// # Errors
    /// [`CatalogError::UnknownField`] for unregistered names, plus the
    /// read-only and type errors of [`fields::FieldSpec::assign`].
    pub fn apply_field_change(
        &self,
        store: &RecordStore,
        id: ProductId,
        field: &str,
        value: Option<FieldValue>,
    ) -> Result<RecordStore, CatalogError> {
        let spec = fields::lookup(field).ok_or_else(|| CatalogError::UnknownField(field.into()))?;
        let Some(current) = store.get(id) else {
            debug!(product_id = id, field, "field change ignored: id not in store");
            return Ok(store.clone());
        };
        let mut updated = current.as_ref().clone();
        spec.assign(&mut updated, value)?;
        Ok(store.replace(id, updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;
    use rust_decimal::Decimal;

    fn store() -> RecordStore {
        RecordStore::new(sample_catalog()).expect("store")
    }

    #[test]
    fn begin_edit_replaces_prior_target() {
        let mut overlay = EditOverlay::default();
        assert_eq!(overlay.current_edit_target(), None);
        overlay.begin_edit(1);
        overlay.begin_edit(4);
        assert_eq!(overlay.current_edit_target(), Some(4));
        assert!(overlay.is_editing(4));
        assert!(!overlay.is_editing(1));
    }

    #[test]
    fn field_change_touches_only_that_field() {
        let store = store();
        let overlay = EditOverlay::default();
        let next = overlay
            .apply_field_change(&store, 2, "UnitPrice", Some(FieldValue::Integer(99)))
            .expect("apply");

        let before = store.get(2).expect("record").as_ref().clone();
        let after = next.get(2).expect("record").as_ref().clone();
        assert_eq!(after.unit_price, Some(Decimal::from(99)));
        assert_eq!(
            crate::models::ProductRecord {
                unit_price: before.unit_price,
                ..after
            },
            before
        );
    }

    #[test]
    fn field_change_can_clear_optional_values() {
        let overlay = EditOverlay::default();
        let next = overlay
            .apply_field_change(&store(), 5, "ProductName", None)
            .expect("apply");
        assert_eq!(next.get(5).and_then(|r| r.product_name.clone()), None);
    }

    #[test]
    fn field_change_on_missing_id_is_noop() {
        let store = store();
        let next = EditOverlay::default()
            .apply_field_change(&store, 404, "UnitPrice", Some(FieldValue::Integer(1)))
            .expect("noop");
        assert_eq!(next, store);
    }

    #[test]
    fn field_change_rejects_unknown_and_read_only_fields() {
        let store = store();
        let overlay = EditOverlay::default();
        assert!(matches!(
            overlay.apply_field_change(&store, 1, "Colour", Some("red".into())),
            Err(CatalogError::UnknownField(name)) if name == "Colour"
        ));
        assert!(matches!(
            overlay.apply_field_change(&store, 1, "ProductID", Some(FieldValue::Integer(2))),
            Err(CatalogError::ReadOnlyField("ProductID"))
        ));
    }
}
