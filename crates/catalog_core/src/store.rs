//! Copy-on-write record store.

use crate::error::CatalogError;
use crate::models::{ProductId, ProductRecord};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Authoritative, ordered snapshot of every product record.
///
/// Snapshots are immutable: [`RecordStore::replace`] returns a new store that
/// shares unchanged records with the old one, so pages computed from an
/// earlier snapshot stay valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Arc<Vec<Arc<ProductRecord>>>,
}

impl RecordStore {
    /// Build a store from seed records, preserving their order.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateProductId`] when two records share an id.
    pub fn new(records: Vec<ProductRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.product_id) {
                return Err(CatalogError::DuplicateProductId(record.product_id));
            }
        }
        Ok(Self {
            records: Arc::new(records.into_iter().map(Arc::new).collect()),
        })
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[Arc<ProductRecord>] {
        self.records.as_slice()
    }

    pub fn get(&self, id: ProductId) -> Option<&Arc<ProductRecord>> {
        self.records.iter().find(|record| record.product_id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// New snapshot with the record matching `id` replaced wholesale.
    ///
    /// An unmatched id is ignored and yields a snapshot equal to `self`. The
    /// replacement keeps the original identity even if `updated` carries a
    /// different id.
    pub fn replace(&self, id: ProductId, updated: ProductRecord) -> RecordStore {
        let Some(position) = self.records.iter().position(|record| record.product_id == id)
        else {
            debug!(product_id = id, "replace ignored: id not in store");
            return self.clone();
        };
        let mut records = self.records.as_ref().clone();
        records[position] = Arc::new(ProductRecord {
            product_id: id,
            ..updated
        });
        RecordStore {
            records: Arc::new(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{priced, sample_catalog};
    use rust_decimal::Decimal;

    #[test]
    fn new_rejects_duplicate_ids() {
        let err = RecordStore::new(vec![priced(1, 1), priced(2, 2), priced(1, 3)])
            .expect_err("duplicate");
        assert!(matches!(err, CatalogError::DuplicateProductId(1)));
    }

    #[test]
    fn replace_swaps_exactly_one_record() {
        let store = RecordStore::new(sample_catalog()).expect("store");
        let mut updated = store.get(3).expect("record 3").as_ref().clone();
        updated.unit_price = Some(Decimal::from(99));

        let next = store.replace(3, updated.clone());
        assert_eq!(next.len(), store.len());
        let differing: Vec<i64> = store
            .all()
            .iter()
            .zip(next.all())
            .filter(|(before, after)| before != after)
            .map(|(before, _)| before.product_id)
            .collect();
        assert_eq!(differing, vec![3]);
        assert_eq!(next.get(3).map(|record| record.as_ref()), Some(&updated));
    }

    #[test]
    fn replace_leaves_prior_snapshot_intact() {
        let store = RecordStore::new(sample_catalog()).expect("store");
        let held = store.all()[0].clone();
        let next = store.replace(1, priced(1, 500));

        assert_eq!(held.unit_price, Some(Decimal::new(1800, 2)));
        assert_eq!(store.get(1).and_then(|r| r.unit_price), Some(Decimal::new(1800, 2)));
        assert_eq!(next.get(1).and_then(|r| r.unit_price), Some(Decimal::from(500)));
        assert!(Arc::ptr_eq(&store.all()[1], &next.all()[1]));
    }

    #[test]
    fn replace_with_unknown_id_is_noop() {
        let store = RecordStore::new(sample_catalog()).expect("store");
        let next = store.replace(404, priced(404, 1));
        assert_eq!(next, store);
        assert!(next.get(404).is_none());
    }

    #[test]
    fn replace_keeps_identity() {
        let store = RecordStore::new(sample_catalog()).expect("store");
        let next = store.replace(2, priced(77, 1));
        assert!(next.get(77).is_none());
        assert_eq!(next.get(2).and_then(|r| r.unit_price), Some(Decimal::from(1)));
    }
}
