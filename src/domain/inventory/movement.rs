//! Stock movements (IN/OUT transactions against a product).

use super::{lenient_number, lenient_string, non_empty, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MoveType {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl MoveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveType::In => "IN",
            MoveType::Out => "OUT",
        }
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact match only: `"in"` or `" IN"` are rejected.
impl FromStr for MoveType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(MoveType::In),
            "OUT" => Ok(MoveType::Out),
            other => Err(ValidationError::InvalidMoveType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Movement {
    pub id: String,
    pub product_id: String,
    #[serde(rename = "type")]
    pub kind: MoveType,
    pub qty: f64,
    pub unit_price: f64,
    /// ISO-8601 date or datetime; movements are ordered by this string.
    pub date_iso: String,
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateMoveRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_id: Option<String>,
    /// `"IN"` or `"OUT"`.
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    /// Must be non-zero. Numeric strings are accepted.
    #[serde(default, deserialize_with = "lenient_number")]
    pub qty: Option<f64>,
    /// Defaults to 0. Numeric strings are accepted.
    #[serde(default, deserialize_with = "lenient_number")]
    pub unit_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_iso: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub note: Option<String>,
}

/// A validated movement, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub product_id: String,
    pub kind: MoveType,
    pub qty: f64,
    pub unit_price: f64,
    pub date_iso: String,
    pub note: Option<String>,
}

impl CreateMoveRequest {
    /// Presence is checked first (empty strings and a zero `qty` count as
    /// missing), then the movement type.
    ///
    /// `product_id` is not checked against existing products here; the
    /// foreign key on `moves.product_id` is the only guard.
    pub fn validate(self) -> Result<NewMovement, ValidationError> {
        let product_id = non_empty(self.product_id);
        let kind = non_empty(self.kind);
        let qty = self.qty.filter(|q| *q != 0.0);
        let date_iso = non_empty(self.date_iso);

        let (Some(product_id), Some(kind), Some(qty), Some(date_iso)) =
            (product_id, kind, qty, date_iso)
        else {
            return Err(ValidationError::MissingMoveFields);
        };

        Ok(NewMovement {
            product_id,
            kind: kind.parse()?,
            qty,
            unit_price: self.unit_price.unwrap_or(0.0),
            date_iso,
            note: non_empty(self.note),
        })
    }
}

impl NewMovement {
    pub fn into_movement(self, id: String) -> Movement {
        Movement {
            id,
            product_id: self.product_id,
            kind: self.kind,
            qty: self.qty,
            unit_price: self.unit_price,
            date_iso: self.date_iso,
            note: self.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<NewMovement, ValidationError> {
        serde_json::from_value::<CreateMoveRequest>(value)
            .unwrap()
            .validate()
    }

    #[test]
    fn accepts_a_complete_inbound_move() {
        let mv = parse(json!({
            "product_id": "p-1",
            "type": "IN",
            "qty": 10,
            "date_iso": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(mv.kind, MoveType::In);
        assert_eq!(mv.qty, 10.0);
        assert_eq!(mv.unit_price, 0.0);
        assert_eq!(mv.note, None);
    }

    #[test]
    fn keeps_price_and_note() {
        let mv = parse(json!({
            "product_id": "p-1",
            "type": "OUT",
            "qty": 2.5,
            "unit_price": 3.75,
            "date_iso": "2024-02-01T10:00:00Z",
            "note": "sold at the fair"
        }))
        .unwrap();
        assert_eq!(mv.kind, MoveType::Out);
        assert_eq!(mv.unit_price, 3.75);
        assert_eq!(mv.note.as_deref(), Some("sold at the fair"));
    }

    #[test]
    fn empty_note_is_stored_as_null() {
        let mv = parse(json!({
            "product_id": "p-1",
            "type": "IN",
            "qty": 1,
            "date_iso": "2024-01-01",
            "note": ""
        }))
        .unwrap();
        assert_eq!(mv.note, None);
    }

    #[test]
    fn zero_or_missing_fields_are_reported_as_missing() {
        let base = json!({
            "product_id": "p-1",
            "type": "IN",
            "qty": 1,
            "date_iso": "2024-01-01"
        });
        for field in ["product_id", "type", "qty", "date_iso"] {
            let mut body = base.clone();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(parse(body), Err(ValidationError::MissingMoveFields), "{field}");
        }

        let mut zero = base.clone();
        zero["qty"] = json!(0);
        assert_eq!(parse(zero), Err(ValidationError::MissingMoveFields));

        let mut empty_id = base.clone();
        empty_id["product_id"] = json!("");
        assert_eq!(parse(empty_id), Err(ValidationError::MissingMoveFields));

        let mut null_date = base;
        null_date["date_iso"] = json!(null);
        assert_eq!(parse(null_date), Err(ValidationError::MissingMoveFields));
    }

    #[test]
    fn string_quantities_are_coerced() {
        let mv = parse(json!({
            "product_id": "p-1",
            "type": "OUT",
            "qty": "10",
            "unit_price": "2.5",
            "date_iso": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(mv.qty, 10.0);
        assert_eq!(mv.unit_price, 2.5);
    }

    #[test]
    fn string_zero_qty_is_still_missing() {
        let err = parse(json!({
            "product_id": "p-1",
            "type": "IN",
            "qty": "0",
            "date_iso": "2024-01-01"
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingMoveFields);
    }

    #[test]
    fn numeric_type_is_invalid_not_malformed() {
        let err = parse(json!({
            "product_id": 7,
            "type": 1,
            "qty": 1,
            "date_iso": "2024-01-01"
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidMoveType("1".to_string()));
    }

    #[test]
    fn rejects_unknown_types() {
        for kind in ["in", "Out", "TRANSFER", " IN"] {
            let err = parse(json!({
                "product_id": "p-1",
                "type": kind,
                "qty": 1,
                "date_iso": "2024-01-01"
            }))
            .unwrap_err();
            assert_eq!(err, ValidationError::InvalidMoveType(kind.to_string()));
        }
    }

    #[test]
    fn missing_fields_win_over_invalid_type() {
        let err = parse(json!({ "type": "SIDEWAYS", "qty": 1 })).unwrap_err();
        assert_eq!(err, ValidationError::MissingMoveFields);
    }

    #[test]
    fn serializes_type_field_by_wire_name() {
        let mv = NewMovement {
            product_id: "p-1".to_string(),
            kind: MoveType::Out,
            qty: 4.0,
            unit_price: 0.0,
            date_iso: "2024-01-01".to_string(),
            note: None,
        }
        .into_movement("m-1".to_string());
        let value = serde_json::to_value(&mv).unwrap();
        assert_eq!(value["type"], "OUT");
        assert_eq!(value["note"], serde_json::Value::Null);
        assert!(value.get("kind").is_none());
    }
}
