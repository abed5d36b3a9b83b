// src/bin/api_server.rs

use std::net::SocketAddr;

use anyhow::Context;
use inventory_api::infra::{config, telemetry};
use inventory_api::transport;
use inventory_api::InventoryService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    telemetry::init();

    let database_url = config::database_url()?;
    let port = config::port()?;
    let public_dir = config::public_dir();
    let max_connections = config::db_max_connections()?;

    // --- Store Initialization ---
    tracing::info!(max_connections, "connecting to database");
    let inventory = InventoryService::connect(&database_url, max_connections)
        .await
        .context("failed to connect to DATABASE_URL")?;
    inventory
        .ensure_schema()
        .await
        .context("failed to create products/moves tables")?;
    tracing::info!("database ready");

    if !public_dir.join("index.html").is_file() {
        tracing::warn!(
            dir = %public_dir.display(),
            "no index.html in public directory; SPA fallback will return 404"
        );
    }

    // --- API Server Initialization ---
    let app_state = transport::http::AppState::new(inventory);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let swagger = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi());
    let app = transport::http::create_router(app_state)
        .merge(swagger)
        .fallback_service(transport::http::spa_fallback(&public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("inventory API listening on http://localhost:{}", port);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
