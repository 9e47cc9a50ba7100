//! Filter-tree evaluation against product records.

use super::state::{CompositeFilter, FilterLogic, FilterNode, FilterOperator, FilterPredicate};
use crate::fields::{self, compare_present, FieldKind, FieldSpec, FieldValue};
use crate::models::ProductRecord;
use std::cmp::Ordering;
use tracing::debug;

/// Filter tree with field names resolved and operands coerced.
#[derive(Debug)]
pub(crate) enum CompiledFilter {
    All(Vec<CompiledFilter>),
    Any(Vec<CompiledFilter>),
    Leaf(CompiledPredicate),
    Never,
}

#[derive(Debug)]
pub(crate) struct CompiledPredicate {
    spec: &'static FieldSpec,
    operator: FilterOperator,
    operand: Option<FieldValue>,
    ignore_case: bool,
}

impl CompiledFilter {
    pub(crate) fn compile(filter: &CompositeFilter) -> Self {
        let children = filter.filters.iter().map(compile_node).collect();
        match filter.logic {
            FilterLogic::And => CompiledFilter::All(children),
            FilterLogic::Or if filter.filters.is_empty() => CompiledFilter::All(children),
            FilterLogic::Or => CompiledFilter::Any(children),
        }
    }

    pub(crate) fn matches(&self, record: &ProductRecord) -> bool {
        match self {
            CompiledFilter::All(children) => children.iter().all(|child| child.matches(record)),
            CompiledFilter::Any(children) => children.iter().any(|child| child.matches(record)),
            CompiledFilter::Leaf(predicate) => predicate.matches(record),
            CompiledFilter::Never => false,
        }
    }
}

fn compile_node(node: &FilterNode) -> CompiledFilter {
    match node {
        FilterNode::Composite(composite) => CompiledFilter::compile(composite),
        FilterNode::Predicate(predicate) => compile_predicate(predicate),
    }
}

fn compile_predicate(predicate: &FilterPredicate) -> CompiledFilter {
    let Some(spec) = fields::lookup(&predicate.field) else {
        debug!(field = %predicate.field, "filter references unknown field");
        return CompiledFilter::Never;
    };
    let operator = predicate.operator;
    let operand = if operator.is_unary() {
        None
    } else {
        let target = if operator.is_text_match() {
            FieldKind::Text
        } else {
            spec.kind
        };
        let Some(operand) = predicate.value.as_ref().and_then(|value| value.coerce(target)) else {
            debug!(
                field = spec.name,
                ?operator,
                "filter operand missing or not coercible to field kind"
            );
            return CompiledFilter::Never;
        };
        Some(fold_case(operand, predicate.ignore_case))
    };
    CompiledFilter::Leaf(CompiledPredicate {
        spec,
        operator,
        operand,
        ignore_case: predicate.ignore_case,
    })
}

fn fold_case(value: FieldValue, ignore_case: bool) -> FieldValue {
    match value {
        FieldValue::Text(text) if ignore_case => FieldValue::Text(text.to_lowercase()),
        other => other,
    }
}

impl CompiledPredicate {
    fn matches(&self, record: &ProductRecord) -> bool {
        let value = self.spec.value(record);
        match self.operator {
            FilterOperator::IsNull => return value.is_none(),
            FilterOperator::IsNotNull => return value.is_some(),
            FilterOperator::IsEmpty => return is_empty_text(value.as_ref()),
            FilterOperator::IsNotEmpty => {
                return value.is_some() && !is_empty_text(value.as_ref())
            }
            _ => {}
        }
        let (Some(value), Some(operand)) = (value, self.operand.as_ref()) else {
            return false;
        };

        if self.operator.is_text_match() {
            let haystack = match fold_case(FieldValue::Text(value.to_string()), self.ignore_case) {
                FieldValue::Text(text) => text,
                _ => return false,
            };
            let needle = operand.to_string();
            return match self.operator {
                FilterOperator::Contains => haystack.contains(&needle),
                FilterOperator::DoesNotContain => !haystack.contains(&needle),
                FilterOperator::StartsWith => haystack.starts_with(&needle),
                FilterOperator::EndsWith => haystack.ends_with(&needle),
                _ => false,
            };
        }

        let ordering = compare_present(&fold_case(value, self.ignore_case), operand);
        match self.operator {
            FilterOperator::Eq => ordering == Ordering::Equal,
            FilterOperator::Neq => ordering != Ordering::Equal,
            FilterOperator::Lt => ordering == Ordering::Less,
            FilterOperator::Lte => ordering != Ordering::Greater,
            FilterOperator::Gt => ordering == Ordering::Greater,
            FilterOperator::Gte => ordering != Ordering::Less,
            _ => false,
        }
    }
}

fn is_empty_text(value: Option<&FieldValue>) -> bool {
    matches!(value, Some(FieldValue::Text(text)) if text.is_empty())
}
