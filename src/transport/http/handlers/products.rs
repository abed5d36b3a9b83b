use crate::app::inventory_service::is_unique_violation;
use crate::domain::inventory::{CreateProductRequest, Product};
use crate::transport::http::handlers::common::ApiError;
use crate::transport::http::types::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products, ordered by name", body = [Product]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .inventory
        .list_products()
        .await
        .map_err(|e| ApiError::store("failed to list products", e))?;
    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing code/name or malformed body", body = ErrorBody),
        (status = 409, description = "Code already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(request) = request.map_err(|e| {
        ApiError::invalid_body(
            e,
            "{\"code\": ..., \"name\": ..., \"unit\"?, \"min_stock\"?, \"base_cost\"?}",
        )
    })?;
    let new_product = request.validate()?;

    match state.inventory.create_product(new_product).await {
        Ok(product) => {
            tracing::info!(id = %product.id, code = %product.code, "product created");
            Ok((StatusCode::CREATED, Json(product)))
        }
        Err(e) if is_unique_violation(&e) => {
            Err(ApiError::Conflict("code already exists".to_string()))
        }
        Err(e) => Err(ApiError::store("failed to create product", e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product and its movements deleted"),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!(%id, "DELETE /api/products");
    match state.inventory.delete_product(&id).await {
        Ok(Some(removed_moves)) => {
            tracing::info!(%id, removed_moves, "product deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(None) => Err(ApiError::not_found("product not found", id)),
        Err(e) => Err(ApiError::store("failed to delete product", e)),
    }
}
