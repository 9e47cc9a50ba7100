//! Category snapshot embedded in product records.

use serde::{Deserialize, Serialize};

/// Read-only category data carried alongside each product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "CategoryID", default)]
    pub category_id: Option<i64>,
    #[serde(rename = "CategoryName", default)]
    pub category_name: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}
