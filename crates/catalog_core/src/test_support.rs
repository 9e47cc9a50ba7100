//! Shared test-only helpers for catalog_core.

use crate::models::{Category, ProductRecord};
use rust_decimal::Decimal;
use std::sync::{Mutex, OnceLock};

/// Process-wide mutex serializing environment mutation across test threads.
pub(crate) fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Restores an environment variable value on drop.
pub(crate) struct EnvGuard {
    key: String,
    previous: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }

    pub(crate) fn remove(key: &str) -> Self {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.previous.as_deref() {
            Some(previous) => std::env::set_var(&self.key, previous),
            None => std::env::remove_var(&self.key),
        }
    }
}

/// Builds a product with only an id and a unit price.
pub(crate) fn priced(id: i64, price: i64) -> ProductRecord {
    ProductRecord {
        unit_price: Some(Decimal::from(price)),
        ..ProductRecord::new(id)
    }
}

/// Builds a fully populated product in the given category.
pub(crate) fn product(
    id: i64,
    name: &str,
    category: &str,
    price: &str,
    in_stock: i64,
    discontinued: bool,
) -> ProductRecord {
    ProductRecord {
        product_name: Some(name.to_string()),
        supplier_id: Some(1),
        category_id: Some(1),
        quantity_per_unit: Some("10 boxes".to_string()),
        unit_price: Some(price.parse().expect("decimal literal")),
        units_in_stock: Some(in_stock),
        units_on_order: Some(0),
        reorder_level: Some(5),
        discontinued: Some(discontinued),
        category: Some(Category {
            category_id: Some(1),
            category_name: Some(category.to_string()),
            description: None,
        }),
        ..ProductRecord::new(id)
    }
}

/// A small mixed catalog used by query and controller tests.
pub(crate) fn sample_catalog() -> Vec<ProductRecord> {
    vec![
        product(1, "Chai", "Beverages", "18.00", 39, false),
        product(2, "Chang", "Beverages", "19.00", 17, false),
        product(3, "Aniseed Syrup", "Condiments", "10.00", 13, false),
        product(4, "Chef Anton's Gumbo Mix", "Condiments", "21.35", 0, true),
        product(5, "Pavlova", "Confections", "17.45", 29, false),
        product(6, "Tofu", "Produce", "23.25", 35, false),
        product(7, "Ikura", "Seafood", "31.00", 31, false),
        product(8, "Alice Mutton", "Meat/Poultry", "39.00", 0, true),
    ]
}
