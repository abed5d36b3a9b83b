pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::inventory_service::{InventoryService, SortOrder};
pub use domain::inventory::{MoveType, Movement, Product, Report, ValidationError};
