use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorResponse {
    pub fn send(status: u16, message: Option<String>) -> Response {
        let status_code = StatusCode::from_u16(status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match status_code {
            s if s.is_server_error() => {
                tracing::error!(status, ?message, "Request failed")
            }
            _ => tracing::info!(status, ?message, "Request rejected"),
        }

        (status_code, Json(ApiErrorResponse { status, message }))
            .into_response()
    }
}
