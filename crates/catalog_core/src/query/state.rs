//! View-state descriptors: paging, sort keys, and filter trees.

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::fields::FieldValue;
use serde::{Deserialize, Serialize};

/// Paging, sorting and filtering descriptor driving the visible page.
///
/// Replaced wholesale on every state-change event; there is no partial merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Offset into the filtered and sorted sequence.
    #[serde(default)]
    pub skip: usize,
    /// Page size.
    #[serde(default = "default_take")]
    pub take: usize,
    /// Sort keys in tie-break priority order.
    #[serde(default)]
    pub sort: Vec<SortDescriptor>,
    /// Root filter node.
    #[serde(default)]
    pub filter: CompositeFilter,
}

fn default_take() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    /// Initial state: first page of `take` rows, no sort, empty `or` filter.
    pub fn with_page_size(take: usize) -> Self {
        Self {
            skip: 0,
            take,
            sort: Vec::new(),
            filter: CompositeFilter::default(),
        }
    }
}

/// Sort direction of a single key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub field: String,
    #[serde(default)]
    pub dir: SortDirection,
}

impl SortDescriptor {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDirection::Desc,
        }
    }
}

/// How a composite node combines its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterLogic {
    And,
    #[default]
    Or,
}

/// Internal filter node. An empty `filters` list matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeFilter {
    pub logic: FilterLogic,
    pub filters: Vec<FilterNode>,
}

impl CompositeFilter {
    pub fn and(filters: Vec<FilterNode>) -> Self {
        Self {
            logic: FilterLogic::And,
            filters,
        }
    }

    pub fn or(filters: Vec<FilterNode>) -> Self {
        Self {
            logic: FilterLogic::Or,
            filters,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// A child of a composite: either a nested composite or a leaf predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Composite(CompositeFilter),
    Predicate(FilterPredicate),
}

impl From<CompositeFilter> for FilterNode {
    fn from(value: CompositeFilter) -> Self {
        FilterNode::Composite(value)
    }
}

impl From<FilterPredicate> for FilterNode {
    fn from(value: FilterPredicate) -> Self {
        FilterNode::Predicate(value)
    }
}

/// Leaf predicate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    IsNull,
    IsNotNull,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOperator {
    /// Operators that test substrings of the rendered text value.
    pub fn is_text_match(self) -> bool {
        matches!(
            self,
            FilterOperator::Contains
                | FilterOperator::DoesNotContain
                | FilterOperator::StartsWith
                | FilterOperator::EndsWith
        )
    }

    /// Operators that ignore the predicate operand.
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            FilterOperator::IsNull
                | FilterOperator::IsNotNull
                | FilterOperator::IsEmpty
                | FilterOperator::IsNotEmpty
        )
    }
}

/// Single `field operator value` test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: Option<FieldValue>,
    /// Case-insensitive text comparison; defaults to true.
    #[serde(rename = "ignoreCase", default = "default_ignore_case")]
    pub ignore_case: bool,
}

fn default_ignore_case() -> bool {
    true
}

impl FilterPredicate {
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FieldValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: Some(value.into()),
            ignore_case: true,
        }
    }

    /// Predicate for operators that take no operand (`isnull`, `isempty`, ...).
    pub fn unary(field: impl Into<String>, operator: FilterOperator) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
            ignore_case: true,
        }
    }

    pub fn case_sensitive(mut self) -> Self {
        self.ignore_case = false;
        self
    }
}
