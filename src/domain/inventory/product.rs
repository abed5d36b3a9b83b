//! Product records and the create-request validation rules.

use super::{lenient_number, lenient_string, non_empty, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unit used when a create request does not name one.
pub const DEFAULT_UNIT: &str = "un";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    /// Business key, unique across all products.
    pub code: String,
    pub name: String,
    pub unit: String,
    pub min_stock: f64,
    pub base_cost: f64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// Numbers are accepted and read as text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Defaults to `"un"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: Option<String>,
    /// Defaults to 0. Numeric strings are accepted.
    #[serde(default, deserialize_with = "lenient_number")]
    pub min_stock: Option<f64>,
    /// Defaults to 0. Numeric strings are accepted.
    #[serde(default, deserialize_with = "lenient_number")]
    pub base_cost: Option<f64>,
}

/// A validated product, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub unit: String,
    pub min_stock: f64,
    pub base_cost: f64,
}

impl CreateProductRequest {
    /// Trims `code` and `name`, rejects them when empty, and fills in defaults.
    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        let code = non_empty(self.code.map(|s| s.trim().to_string()));
        let name = non_empty(self.name.map(|s| s.trim().to_string()));
        let (Some(code), Some(name)) = (code, name) else {
            return Err(ValidationError::MissingCodeOrName);
        };

        Ok(NewProduct {
            code,
            name,
            unit: self.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            min_stock: self.min_stock.unwrap_or(0.0),
            base_cost: self.base_cost.unwrap_or(0.0),
        })
    }
}

impl NewProduct {
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            code: self.code,
            name: self.name,
            unit: self.unit,
            min_stock: self.min_stock,
            base_cost: self.base_cost,
        }
    }
}
