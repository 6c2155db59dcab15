use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::balance::BalanceError;
use crate::response::api::ApiErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    BalanceError(#[from] BalanceError),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(value: validator::ValidationErrors) -> Self {
        ApiError::InvalidRequest(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BalanceError(error) => error.into_response(),
            ApiError::InvalidRequest(reason) => ApiErrorResponse::send(
                StatusCode::BAD_REQUEST.as_u16(),
                Some(reason),
            ),
            ApiError::InvalidBody(rejection) => ApiErrorResponse::send(
                rejection.status().as_u16(),
                Some(rejection.body_text()),
            ),
        }
    }
}
