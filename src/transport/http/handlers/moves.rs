use crate::app::inventory_service::SortOrder;
use crate::domain::inventory::{CreateMoveRequest, Movement};
use crate::transport::http::handlers::common::ApiError;
use crate::transport::http::types::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/moves",
    responses(
        (status = 200, description = "All movements, most recent date_iso first", body = [Movement]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn list_moves_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Movement>>, ApiError> {
    let moves = state
        .inventory
        .list_moves(SortOrder::Desc)
        .await
        .map_err(|e| ApiError::store("failed to list moves", e))?;
    Ok(Json(moves))
}

#[utoipa::path(
    post,
    path = "/api/moves",
    request_body = CreateMoveRequest,
    responses(
        (status = 201, description = "Movement created", body = Movement),
        (status = 400, description = "Missing fields, invalid type or malformed body", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn create_move_handler(
    State(state): State<AppState>,
    request: Result<Json<CreateMoveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Movement>), ApiError> {
    let Json(request) = request.map_err(|e| {
        ApiError::invalid_body(
            e,
            concat!(
                "{\"product_id\": ..., \"type\": \"IN\"|\"OUT\", \"qty\": ..., ",
                "\"date_iso\": ..., \"unit_price\"?, \"note\"?}"
            ),
        )
    })?;
    let new_move = request.validate()?;

    let movement = state
        .inventory
        .create_move(new_move)
        .await
        .map_err(|e| ApiError::store("server error", e))?;
    tracing::info!(
        id = %movement.id,
        product_id = %movement.product_id,
        kind = %movement.kind,
        "move created"
    );
    Ok((StatusCode::CREATED, Json(movement)))
}

#[utoipa::path(
    delete,
    path = "/api/moves/{id}",
    params(
        ("id" = String, Path, description = "Movement id")
    ),
    responses(
        (status = 204, description = "Movement deleted"),
        (status = 404, description = "Movement not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn delete_move_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!(%id, "DELETE /api/moves");
    match state.inventory.delete_move(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::not_found("move not found", id)),
        Err(e) => Err(ApiError::store("failed to delete move", e)),
    }
}
