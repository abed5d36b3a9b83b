//! The inventory store client.
//!
//! Owns the PostgreSQL connection pool and holds every SQL statement the API
//! issues. It is built once at startup and shared with the HTTP handlers
//! through `AppState`.
//!
//! Methods return `sqlx::Error` unchanged; translating store failures into
//! HTTP responses is the transport layer's job.

use crate::domain::inventory::{MoveType, Movement, NewMovement, NewProduct, Product, Report};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, code, name, unit, min_stock, base_cost";
const MOVE_COLUMNS: &str = "id, product_id, type, qty, unit_price, date_iso, note";

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Direction used when ordering movements by `date_iso`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

pub struct InventoryService {
    pool: PgPool,
}

impl InventoryService {
    /// Connects to the database. The schema is not touched; call
    /// [`InventoryService::ensure_schema`] for that.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, anyhow::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool (lazy pools in tests, shared pools in tools).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `products` and `moves` tables when they are missing.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                code TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                unit TEXT NOT NULL DEFAULT 'un',
                min_stock DOUBLE PRECISION NOT NULL DEFAULT 0,
                base_cost DOUBLE PRECISION NOT NULL DEFAULT 0
            )",
        )
        .execute(&self.pool)
        .await?;

        // No ON DELETE CASCADE: product deletion removes its moves explicitly.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS moves (
                id TEXT PRIMARY KEY,
                product_id TEXT NOT NULL REFERENCES products(id),
                type TEXT NOT NULL CHECK (type IN ('IN', 'OUT')),
                qty DOUBLE PRECISION NOT NULL,
                unit_price DOUBLE PRECISION NOT NULL DEFAULT 0,
                date_iso TEXT NOT NULL,
                note TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Round-trips a trivial query; used by the health check.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, sqlx::Error> {
        let sql = format!("SELECT {} FROM products ORDER BY name ASC", PRODUCT_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(product_from_row).collect()
    }

    /// Inserts a product under a freshly generated id.
    ///
    /// A duplicate `code` surfaces as a database error for which
    /// [`is_unique_violation`] returns true.
    pub async fn create_product(&self, new_product: NewProduct) -> Result<Product, sqlx::Error> {
        let product = new_product.into_product(Uuid::new_v4().to_string());
        let sql = format!(
            "INSERT INTO products ({cols}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {cols}",
            cols = PRODUCT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&product.id)
            .bind(&product.code)
            .bind(&product.name)
            .bind(&product.unit)
            .bind(product.min_stock)
            .bind(product.base_cost)
            .fetch_one(&self.pool)
            .await?;
        product_from_row(&row)
    }

    /// Deletes a product together with every movement that references it.
    ///
    /// Both deletes share one transaction. Returns `None` (and rolls back)
    /// when no product has this id; otherwise the number of movements removed.
    pub async fn delete_product(&self, id: &str) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let removed_moves = sqlx::query("DELETE FROM moves WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed_products = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed_products == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(removed_moves))
    }

    /// Ties on `date_iso` are broken by `id` in the same direction, so the
    /// two orders are exact reverses of each other.
    pub async fn list_moves(&self, order: SortOrder) -> Result<Vec<Movement>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM moves ORDER BY {}",
            MOVE_COLUMNS,
            moves_order_by(order)
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(movement_from_row).collect()
    }

    pub async fn create_move(&self, new_move: NewMovement) -> Result<Movement, sqlx::Error> {
        let movement = new_move.into_movement(Uuid::new_v4().to_string());
        let sql = format!(
            "INSERT INTO moves ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {cols}",
            cols = MOVE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&movement.id)
            .bind(&movement.product_id)
            .bind(movement.kind.as_str())
            .bind(movement.qty)
            .bind(movement.unit_price)
            .bind(&movement.date_iso)
            .bind(&movement.note)
            .fetch_one(&self.pool)
            .await?;
        movement_from_row(&row)
    }

    /// Returns whether a movement with this id existed.
    pub async fn delete_move(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM moves WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reads all products and all movements (oldest first) concurrently.
    /// Fails as a whole if either read fails.
    pub async fn report(&self) -> Result<Report, sqlx::Error> {
        let (products, moves) =
            tokio::try_join!(self.list_products(), self.list_moves(SortOrder::Asc))?;
        Ok(Report { products, moves })
    }
}

fn moves_order_by(order: SortOrder) -> String {
    format!("date_iso {dir}, id {dir}", dir = order.as_sql())
}

/// True when the error is a PostgreSQL unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == UNIQUE_VIOLATION;
        }
    }
    false
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        code: row.try_get("code")?,
        name: row.try_get("name")?,
        unit: row.try_get("unit")?,
        min_stock: row.try_get("min_stock")?,
        base_cost: row.try_get("base_cost")?,
    })
}

fn movement_from_row(row: &PgRow) -> Result<Movement, sqlx::Error> {
    let kind: String = row.try_get("type")?;
    let kind = kind.parse::<MoveType>().map_err(|e| sqlx::Error::ColumnDecode {
        index: "type".to_string(),
        source: Box::new(e),
    })?;

    Ok(Movement {
        id: row.try_get("id")?,
        product_id: row.try_get("product_id")?,
        kind,
        qty: row.try_get("qty")?,
        unit_price: row.try_get("unit_price")?,
        date_iso: row.try_get("date_iso")?,
        note: row.try_get("note")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_maps_to_sql_keywords() {
        assert_eq!(SortOrder::Asc.as_sql(), "ASC");
        assert_eq!(SortOrder::Desc.as_sql(), "DESC");
    }

    #[test]
    fn move_ordering_breaks_date_ties_by_id() {
        assert_eq!(moves_order_by(SortOrder::Asc), "date_iso ASC, id ASC");
        assert_eq!(moves_order_by(SortOrder::Desc), "date_iso DESC, id DESC");
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }
}
