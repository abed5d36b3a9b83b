use crate::domain::inventory::{
    CreateMoveRequest, CreateProductRequest, MoveType, Movement, Product, Report,
};
use crate::transport::http::handlers::{health, moves, products, report};
use crate::transport::http::types::{AppState, ErrorBody, HealthResponse};
use axum::routing::{delete, get};
use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::list_products_handler,
        products::create_product_handler,
        products::delete_product_handler,
        moves::list_moves_handler,
        moves::create_move_handler,
        moves::delete_move_handler,
        report::report_handler
    ),
    components(schemas(
        Product,
        CreateProductRequest,
        Movement,
        MoveType,
        CreateMoveRequest,
        Report,
        ErrorBody,
        HealthResponse
    ))
)]
pub struct ApiDoc;

/// JSON API routes plus `/health`. Static files are attached separately
/// with [`spa_fallback`].
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route("/api/products/:id", delete(products::delete_product_handler))
        .route(
            "/api/moves",
            get(moves::list_moves_handler).post(moves::create_move_handler),
        )
        .route("/api/moves/:id", delete(moves::delete_move_handler))
        .route("/api/report", get(report::report_handler))
        .with_state(app_state)
}

/// Serves files from `public_dir`; any path without a matching file gets
/// the single-page app's `index.html`.
pub fn spa_fallback(public_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")))
}
