use super::{Movement, Product};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Every product and every movement, returned together.
///
/// No balances are computed here; consumers derive stock levels themselves.
/// `moves` is ordered by `date_iso` ascending, unlike `GET /api/moves`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub products: Vec<Product>,
    pub moves: Vec<Movement>,
}
