//! In-memory view query engine: filter, then sort, then paginate.

mod filter;
mod sort;
/// View-state descriptor types.
pub mod state;


use crate::models::ProductRecord;
use filter::CompiledFilter;
use std::sync::Arc;

pub use state::{
    CompositeFilter, FilterLogic, FilterNode, FilterOperator, FilterPredicate, SortDescriptor,
    SortDirection, ViewState,
};

/// Visible page plus the number of records that passed the filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub page: Vec<Arc<ProductRecord>>,
    /// Count after filtering, before pagination.
    pub total_matched: usize,
}

/// Evaluate `view_state` against `records`.
///
/// Pure: the input slice is never reordered or mutated. A `skip` past the end
/// or a `take` of zero yields an empty page with `total_matched` still set.
pub fn evaluate(records: &[Arc<ProductRecord>], view_state: &ViewState) -> QueryResult {
    let filter = CompiledFilter::compile(&view_state.filter);
    let mut matched: Vec<Arc<ProductRecord>> = records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect();
    let total_matched = matched.len();
    sort::sort_records(&mut matched, &view_state.sort);

    let page = matched
        .into_iter()
        .skip(view_state.skip)
        .take(view_state.take)
        .collect();
    QueryResult {
        page,
        total_matched,
    }
}

/// Number of pages needed to show `total` records `take` at a time.
pub fn page_count(total: usize, take: usize) -> usize {
    if take == 0 {
        return 0;
    }
    total.div_ceil(take)
}
