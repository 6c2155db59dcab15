use axum::extract::{Path, State};
use axum::Json;
use axum_extra::extract::{Query, WithRejection};
use axum_macros::debug_handler;
use validator::Validate;

use crate::dto::balance::{BalanceUpdateDto, SetBalanceDto, TokenQueryParams};
use crate::error::api::ApiError;
use crate::response::balance::{
    BalanceHistory, BalanceResponse, ClearBalanceResponse, DecrementResponse,
    IncrementResponse, SetBalanceResponse, TokenBalance, UserBalances,
};
use crate::state::common::CommonState;

#[debug_handler]
pub async fn get_balance(
    Path(user_id): Path<String>,
    Query(query): Query<TokenQueryParams>,
    State(state): State<CommonState>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let response = match query.token_symbol() {
        Some(token_symbol) => {
            let balance = state
                .balance_service
                .get_balance(user_id.clone(), &token_symbol)
                .await?;

            BalanceResponse::Token(TokenBalance {
                user_id,
                token_symbol,
                balance,
            })
        }
        None => {
            let balances =
                state.balance_service.get_balances(user_id.clone()).await?;

            BalanceResponse::All(UserBalances { user_id, balances })
        }
    };

    Ok(Json(response))
}

#[debug_handler]
pub async fn set_balance(
    Path(user_id): Path<String>,
    State(state): State<CommonState>,
    WithRejection(Json(body), _): WithRejection<Json<SetBalanceDto>, ApiError>,
) -> Result<Json<SetBalanceResponse>, ApiError> {
    body.validate()?;

    state
        .balance_service
        .set_balance(user_id.clone(), body.token_symbol.clone(), body.balance)
        .await?;

    Ok(Json(SetBalanceResponse::new(
        user_id,
        body.token_symbol,
        body.balance,
    )))
}

#[debug_handler]
pub async fn increment_balance(
    Path(user_id): Path<String>,
    State(state): State<CommonState>,
    WithRejection(Json(body), _): WithRejection<
        Json<BalanceUpdateDto>,
        ApiError,
    >,
) -> Result<Json<IncrementResponse>, ApiError> {
    body.validate()?;

    let change = state
        .balance_service
        .increment_balance(user_id.clone(), body.token_symbol.clone(), body.amount)
        .await?;

    Ok(Json(IncrementResponse::new(
        user_id,
        body.token_symbol,
        body.amount,
        change,
    )))
}

#[debug_handler]
pub async fn decrement_balance(
    Path(user_id): Path<String>,
    State(state): State<CommonState>,
    WithRejection(Json(body), _): WithRejection<
        Json<BalanceUpdateDto>,
        ApiError,
    >,
) -> Result<Json<DecrementResponse>, ApiError> {
    body.validate()?;

    let change = state
        .balance_service
        .decrement_balance(user_id.clone(), body.token_symbol.clone(), body.amount)
        .await?;

    Ok(Json(DecrementResponse::new(
        user_id,
        body.token_symbol,
        body.amount,
        change,
    )))
}

#[debug_handler]
pub async fn get_balance_history(
    Path(user_id): Path<String>,
    State(state): State<CommonState>,
) -> Result<Json<BalanceHistory>, ApiError> {
    let history = state.balance_service.get_history(user_id).await?;

    Ok(Json(history))
}

#[debug_handler]
pub async fn clear_balances(
    Path(user_id): Path<String>,
    Query(query): Query<TokenQueryParams>,
    State(state): State<CommonState>,
) -> Result<Json<ClearBalanceResponse>, ApiError> {
    let token_symbol = query.token_symbol();

    state
        .balance_service
        .clear_balances(user_id.clone(), token_symbol.clone())
        .await?;

    Ok(Json(ClearBalanceResponse::new(user_id, token_symbol)))
}
