use axum::Json;

use crate::response::health::HealthResponse;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
