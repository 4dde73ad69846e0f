use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET the orchestrator's liveness status
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Orchestrator is up and responding to requests", body = String),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "wis-conversation-orchestrator"
        })),
    )
}
