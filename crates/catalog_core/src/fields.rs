//! Typed field registry for product attributes.
//!
//! Sorting, filtering and inline edits address record attributes by their wire
//! name (`"UnitPrice"`, `"Category.CategoryName"`). The registry maps each name
//! to a [`FieldSpec`] carrying its semantic kind, accessor and optional setter,
//! so name resolution happens once per descriptor instead of through ad hoc
//! property indexing.

use crate::error::CatalogError;
use crate::models::ProductRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Semantic type of a record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Decimal,
    Text,
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Text => "text",
            FieldKind::Boolean => "boolean",
        };
        f.write_str(label)
    }
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    /// Kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Decimal(_) => FieldKind::Decimal,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Boolean(_) => FieldKind::Boolean,
        }
    }

    /// Convert this value to `kind` for comparison against a field.
    ///
    /// Integers and whole decimals interchange, numeric text parses, and any
    /// value renders to text. Returns `None` when no sensible conversion exists.
    pub fn coerce(&self, kind: FieldKind) -> Option<FieldValue> {
        match (kind, self) {
            (FieldKind::Integer, FieldValue::Integer(value)) => Some(FieldValue::Integer(*value)),
            (FieldKind::Integer, FieldValue::Decimal(value)) if value.fract().is_zero() => {
                value.to_i64().map(FieldValue::Integer)
            }
            (FieldKind::Integer, FieldValue::Text(text)) => {
                text.trim().parse::<i64>().ok().map(FieldValue::Integer)
            }
            (FieldKind::Decimal, FieldValue::Integer(value)) => {
                Some(FieldValue::Decimal(Decimal::from(*value)))
            }
            (FieldKind::Decimal, FieldValue::Decimal(value)) => Some(FieldValue::Decimal(*value)),
            (FieldKind::Decimal, FieldValue::Text(text)) => {
                Decimal::from_str(text.trim()).ok().map(FieldValue::Decimal)
            }
            (FieldKind::Text, value) => Some(FieldValue::Text(value.to_string())),
            (FieldKind::Boolean, FieldValue::Boolean(value)) => Some(FieldValue::Boolean(*value)),
            (FieldKind::Boolean, FieldValue::Text(text)) => {
                match text.trim().to_ascii_lowercase().as_str() {
                    "true" => Some(FieldValue::Boolean(true)),
                    "false" => Some(FieldValue::Boolean(false)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn into_integer(self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    fn into_decimal(self) -> Option<Decimal> {
        match self {
            FieldValue::Decimal(value) => Some(value),
            FieldValue::Integer(value) => Some(Decimal::from(value)),
            _ => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    fn into_boolean(self) -> Option<bool> {
        match self {
            FieldValue::Boolean(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Decimal(value) => write!(f, "{}", value),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Boolean(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Integer(value) => serializer.serialize_i64(*value),
            FieldValue::Decimal(value) => rust_decimal::serde::float::serialize(value, serializer),
            FieldValue::Text(value) => serializer.serialize_str(value),
            FieldValue::Boolean(value) => serializer.serialize_bool(*value),
        }
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, string, or boolean")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<FieldValue, E> {
        Ok(FieldValue::Boolean(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<FieldValue, E> {
        match i64::try_from(value) {
            Ok(value) => Ok(FieldValue::Integer(value)),
            Err(_) => Ok(FieldValue::Decimal(Decimal::from(value))),
        }
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<FieldValue, E> {
        Decimal::try_from(value)
            .map(FieldValue::Decimal)
            .map_err(|err| E::custom(format!("invalid decimal {}: {}", value, err)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(value))
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

type Getter = fn(&ProductRecord) -> Option<FieldValue>;
type Setter = fn(&mut ProductRecord, Option<FieldValue>);

/// Registry entry describing one addressable record attribute.
pub struct FieldSpec {
    /// Wire name used by sort/filter descriptors and edit events.
    pub name: &'static str,
    /// Semantic kind governing comparison and coercion.
    pub kind: FieldKind,
    get: Getter,
    set: Option<Setter>,
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("editable", &self.is_editable())
            .finish()
    }
}

impl FieldSpec {
    /// Read this attribute from `record`.
    pub fn value(&self, record: &ProductRecord) -> Option<FieldValue> {
        (self.get)(record)
    }

    /// Whether inline edits may write this attribute.
    pub fn is_editable(&self) -> bool {
        self.set.is_some()
    }

    /// Type-aware ordering of two records by this attribute.
    ///
    /// Missing values order before present ones; booleans order `false < true`.
    pub fn compare(&self, left: &ProductRecord, right: &ProductRecord) -> Ordering {
        compare_values(self.value(left).as_ref(), self.value(right).as_ref())
    }

    /// Write `value` into `record`.
    ///
    /// `None` clears the attribute. Integers are accepted for decimal fields;
    /// any other kind mismatch is rejected.
    ///
    /// # Errors
    /// [`CatalogError::ReadOnlyField`] for non-editable attributes and
    /// [`CatalogError::FieldType`] when the value does not fit the field.
    pub fn assign(
        &self,
        record: &mut ProductRecord,
        value: Option<FieldValue>,
    ) -> Result<(), CatalogError> {
        let Some(set) = self.set else {
            return Err(CatalogError::ReadOnlyField(self.name));
        };
        let fits = match (&value, self.kind) {
            (None, _) => true,
            (Some(FieldValue::Integer(_)), FieldKind::Decimal) => true,
            (Some(value), kind) => value.kind() == kind,
        };
        if !fits {
            return Err(CatalogError::FieldType {
                field: self.name,
                expected: self.kind,
            });
        }
        set(record, value);
        Ok(())
    }

    /// Parse raw text from an inline editor into a value for this field.
    ///
    /// Text fields keep the input verbatim. For other kinds, blank input clears
    /// the attribute.
    ///
    /// # Errors
    /// [`CatalogError::FieldType`] when the text does not parse as this kind.
    pub fn parse_input(&self, input: &str) -> Result<Option<FieldValue>, CatalogError> {
        if self.kind == FieldKind::Text {
            return Ok(Some(FieldValue::Text(input.to_string())));
        }
        if input.trim().is_empty() {
            return Ok(None);
        }
        FieldValue::Text(input.to_string())
            .coerce(self.kind)
            .map(Some)
            .ok_or(CatalogError::FieldType {
                field: self.name,
                expected: self.kind,
            })
    }
}

fn compare_values(left: Option<&FieldValue>, right: Option<&FieldValue>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => compare_present(left, right),
    }
}

/// Ordering between two present values of the same field.
pub(crate) fn compare_present(left: &FieldValue, right: &FieldValue) -> Ordering {
    match (left, right) {
        (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
        (FieldValue::Decimal(a), FieldValue::Decimal(b)) => a.cmp(b),
        (FieldValue::Integer(a), FieldValue::Decimal(b)) => Decimal::from(*a).cmp(b),
        (FieldValue::Decimal(a), FieldValue::Integer(b)) => a.cmp(&Decimal::from(*b)),
        (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
        (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
        // Mixed kinds only arise from malformed input; fall back to kind order.
        (a, b) => kind_rank(a.kind()).cmp(&kind_rank(b.kind())),
    }
}

fn kind_rank(kind: FieldKind) -> u8 {
    match kind {
        FieldKind::Boolean => 0,
        FieldKind::Integer | FieldKind::Decimal => 1,
        FieldKind::Text => 2,
    }
}

fn category_value(
    record: &ProductRecord,
    pick: impl Fn(&crate::models::Category) -> Option<FieldValue>,
) -> Option<FieldValue> {
    record.category.as_ref().and_then(pick)
}

static FIELDS: [FieldSpec; 13] = [
    FieldSpec {
        name: "ProductID",
        kind: FieldKind::Integer,
        get: |r| Some(FieldValue::Integer(r.product_id)),
        set: None,
    },
    FieldSpec {
        name: "ProductName",
        kind: FieldKind::Text,
        get: |r| r.product_name.clone().map(FieldValue::Text),
        set: Some(|r, v| r.product_name = v.and_then(FieldValue::into_text)),
    },
    FieldSpec {
        name: "SupplierID",
        kind: FieldKind::Integer,
        get: |r| r.supplier_id.map(FieldValue::Integer),
        set: Some(|r, v| r.supplier_id = v.and_then(FieldValue::into_integer)),
    },
    FieldSpec {
        name: "CategoryID",
        kind: FieldKind::Integer,
        get: |r| r.category_id.map(FieldValue::Integer),
        set: Some(|r, v| r.category_id = v.and_then(FieldValue::into_integer)),
    },
    FieldSpec {
        name: "QuantityPerUnit",
        kind: FieldKind::Text,
        get: |r| r.quantity_per_unit.clone().map(FieldValue::Text),
        set: Some(|r, v| r.quantity_per_unit = v.and_then(FieldValue::into_text)),
    },
    FieldSpec {
        name: "UnitPrice",
        kind: FieldKind::Decimal,
        get: |r| r.unit_price.map(FieldValue::Decimal),
        set: Some(|r, v| r.unit_price = v.and_then(FieldValue::into_decimal)),
    },
    FieldSpec {
        name: "UnitsInStock",
        kind: FieldKind::Integer,
        get: |r| r.units_in_stock.map(FieldValue::Integer),
        set: Some(|r, v| r.units_in_stock = v.and_then(FieldValue::into_integer)),
    },
    FieldSpec {
        name: "UnitsOnOrder",
        kind: FieldKind::Integer,
        get: |r| r.units_on_order.map(FieldValue::Integer),
        set: Some(|r, v| r.units_on_order = v.and_then(FieldValue::into_integer)),
    },
    FieldSpec {
        name: "ReorderLevel",
        kind: FieldKind::Integer,
        get: |r| r.reorder_level.map(FieldValue::Integer),
        set: Some(|r, v| r.reorder_level = v.and_then(FieldValue::into_integer)),
    },
    FieldSpec {
        name: "Discontinued",
        kind: FieldKind::Boolean,
        get: |r| r.discontinued.map(FieldValue::Boolean),
        set: Some(|r, v| r.discontinued = v.and_then(FieldValue::into_boolean)),
    },
    FieldSpec {
        name: "Category.CategoryID",
        kind: FieldKind::Integer,
        get: |r| category_value(r, |c| c.category_id.map(FieldValue::Integer)),
        set: None,
    },
    FieldSpec {
        name: "Category.CategoryName",
        kind: FieldKind::Text,
        get: |r| category_value(r, |c| c.category_name.clone().map(FieldValue::Text)),
        set: None,
    },
    FieldSpec {
        name: "Category.Description",
        kind: FieldKind::Text,
        get: |r| category_value(r, |c| c.description.clone().map(FieldValue::Text)),
        set: None,
    },
];

fn registry() -> &'static HashMap<&'static str, &'static FieldSpec> {
    static REGISTRY: OnceLock<HashMap<&'static str, &'static FieldSpec>> = OnceLock::new();
    REGISTRY.get_or_init(|| FIELDS.iter().map(|spec| (spec.name, spec)).collect())
}

/// Resolve a field by wire name.
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    registry().get(name).copied()
}

/// Every registered field, in declaration order.
pub fn all() -> &'static [FieldSpec] {
    &FIELDS
}
