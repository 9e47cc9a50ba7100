//! Product record model.

use super::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of a product record. Unique within a record store.
pub type ProductId = i64;

/// A single catalog row.
///
/// Every attribute except [`ProductRecord::product_id`] is optional so partial
/// seed rows load without error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "ProductID")]
    pub product_id: ProductId,
    #[serde(rename = "ProductName", default)]
    pub product_name: Option<String>,
    #[serde(rename = "SupplierID", default)]
    pub supplier_id: Option<i64>,
    #[serde(rename = "CategoryID", default)]
    pub category_id: Option<i64>,
    #[serde(rename = "QuantityPerUnit", default)]
    pub quantity_per_unit: Option<String>,
    #[serde(
        rename = "UnitPrice",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub unit_price: Option<Decimal>,
    #[serde(rename = "UnitsInStock", default)]
    pub units_in_stock: Option<i64>,
    #[serde(rename = "UnitsOnOrder", default)]
    pub units_on_order: Option<i64>,
    #[serde(rename = "ReorderLevel", default)]
    pub reorder_level: Option<i64>,
    #[serde(rename = "Discontinued", default)]
    pub discontinued: Option<bool>,
    #[serde(rename = "Category", default)]
    pub category: Option<Category>,
}

impl ProductRecord {
    /// Create a record with the given id and every optional attribute unset.
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            product_name: None,
            supplier_id: None,
            category_id: None,
            quantity_per_unit: None,
            unit_price: None,
            units_in_stock: None,
            units_on_order: None,
            reorder_level: None,
            discontinued: None,
            category: None,
        }
    }

    /// Name of the embedded category, if any.
    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .and_then(|category| category.category_name.as_deref())
    }
}
