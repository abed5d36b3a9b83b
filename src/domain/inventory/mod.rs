//! Inventory domain: products, stock movements and the combined report.
//!
//! Everything in here is store-agnostic. Request payloads are validated into
//! `New*` values before anything reaches the database, so a rejected request
//! never causes a mutation.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use thiserror::Error;

pub mod movement;
pub mod product;
pub mod report;

pub use movement::{CreateMoveRequest, MoveType, Movement, NewMovement};
pub use product::{CreateProductRequest, NewProduct, Product};
pub use report::Report;

/// Reasons a create request is rejected before touching the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("code and name are required")]
    MissingCodeOrName,
    #[error("missing required fields")]
    MissingMoveFields,
    #[error("invalid type")]
    InvalidMoveType(String),
}

/// Returns the string only if it is present and non-empty.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Accepts a JSON string, number or boolean as text.
///
/// `null`, `false` and numeric zero read as absent, so they end up reported
/// as missing fields rather than malformed ones.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) | Some(JsonValue::Bool(false)) => Ok(None),
        Some(JsonValue::Bool(true)) => Ok(Some("true".to_string())),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

/// Accepts a JSON number or a numeric string (`"10"`, `" 2.5 "`).
///
/// `null` and blank strings read as absent.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let n = match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        Some(other) => {
            return Err(D::Error::custom(format!("expected a number, got {}", other)));
        }
    };
    match n {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(D::Error::custom("expected a finite number")),
    }
}
