use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::balance::{Amount, LedgerError};
use shared::error::StorageError;
use thiserror::Error;

use crate::response::api::ApiErrorResponse;

#[derive(Error, Debug)]
pub enum BalanceError {
    #[error("Insufficient balance. Current: {current:?}, Requested: {requested:?}")]
    InsufficientBalance { current: Amount, requested: Amount },
    #[error("User not found")]
    UserNotFound,
    #[error("Token {0} not found for user")]
    TokenNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<LedgerError> for BalanceError {
    fn from(value: LedgerError) -> Self {
        match value {
            LedgerError::InsufficientBalance { current, requested } => {
                BalanceError::InsufficientBalance { current, requested }
            }
            LedgerError::UserNotFound(_) => BalanceError::UserNotFound,
            LedgerError::TokenNotFound { token_symbol, .. } => {
                BalanceError::TokenNotFound(token_symbol)
            }
            error @ LedgerError::InvalidAmount(_) => {
                BalanceError::InvalidAmount(error.to_string())
            }
        }
    }
}

impl IntoResponse for BalanceError {
    fn into_response(self) -> Response {
        let status_code = match self {
            BalanceError::InsufficientBalance { .. }
            | BalanceError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            BalanceError::UserNotFound | BalanceError::TokenNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            BalanceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        ApiErrorResponse::send(status_code.as_u16(), Some(self.to_string()))
    }
}
