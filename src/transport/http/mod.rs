pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod health;
    pub mod moves;
    pub mod products;
    pub mod report;
}

pub use handlers::common::ApiError;
pub use router::{create_router, spa_fallback, ApiDoc};
pub use types::AppState;
