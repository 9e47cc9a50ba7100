//! Multi-key, type-aware, stable record ordering.

use super::state::{SortDescriptor, SortDirection};
use crate::fields::{self, FieldSpec};
use crate::models::ProductRecord;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

fn compile(sort: &[SortDescriptor]) -> Vec<(&'static FieldSpec, SortDirection)> {
    sort.iter()
        .filter_map(|descriptor| match fields::lookup(&descriptor.field) {
            Some(spec) => Some((spec, descriptor.dir)),
            None => {
                // Unknown keys compare equal everywhere, so dropping them is neutral.
                debug!(field = %descriptor.field, "sort references unknown field");
                None
            }
        })
        .collect()
}

/// Sort `records` in place by `sort` keys, first key highest priority.
///
/// Uses a stable sort so records with equal keys keep their incoming order.
pub(crate) fn sort_records(records: &mut [Arc<ProductRecord>], sort: &[SortDescriptor]) {
    let keys = compile(sort);
    if keys.is_empty() {
        return;
    }
    records.sort_by(|left, right| {
        keys.iter()
            .map(|(spec, dir)| {
                let ordering = spec.compare(left, right);
                match dir {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}
