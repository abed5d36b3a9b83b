use crate::domain::inventory::Report;
use crate::transport::http::handlers::common::ApiError;
use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/report",
    responses(
        (status = 200, description = "All products and all movements (oldest date_iso first)", body = Report),
        (status = 500, description = "Either underlying read failed", body = ErrorBody)
    )
)]
pub async fn report_handler(State(state): State<AppState>) -> Result<Json<Report>, ApiError> {
    let report = state
        .inventory
        .report()
        .await
        .map_err(|e| ApiError::store("failed to build report", e))?;
    Ok(Json(report))
}
