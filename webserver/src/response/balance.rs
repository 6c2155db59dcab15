use serde::{Deserialize, Serialize};
use shared::balance::{Amount, BalanceChange, BalanceSheet};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TokenBalance {
    pub user_id: String,
    pub token_symbol: String,
    pub balance: Amount,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserBalances {
    pub user_id: String,
    pub balances: BalanceSheet,
}

/// `GET /balance/{user_id}` answers with a single token when one is asked
/// for, otherwise with the whole sheet.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BalanceResponse {
    Token(TokenBalance),
    All(UserBalances),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SetBalanceResponse {
    pub user_id: String,
    pub token_symbol: String,
    pub balance: Amount,
    pub message: String,
}

impl SetBalanceResponse {
    pub fn new(user_id: String, token_symbol: String, balance: Amount) -> Self {
        Self {
            user_id,
            token_symbol,
            balance,
            message: "Balance set successfully".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IncrementResponse {
    pub user_id: String,
    pub token_symbol: String,
    pub previous_balance: Amount,
    pub increment_amount: Amount,
    pub new_balance: Amount,
    pub message: String,
}

impl IncrementResponse {
    pub fn new(
        user_id: String,
        token_symbol: String,
        amount: Amount,
        change: BalanceChange,
    ) -> Self {
        Self {
            user_id,
            token_symbol,
            previous_balance: change.previous,
            increment_amount: amount,
            new_balance: change.new,
            message: "Balance incremented successfully".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DecrementResponse {
    pub user_id: String,
    pub token_symbol: String,
    pub previous_balance: Amount,
    pub decrement_amount: Amount,
    pub new_balance: Amount,
    pub message: String,
}

impl DecrementResponse {
    pub fn new(
        user_id: String,
        token_symbol: String,
        amount: Amount,
        change: BalanceChange,
    ) -> Self {
        Self {
            user_id,
            token_symbol,
            previous_balance: change.previous,
            decrement_amount: amount,
            new_balance: change.new,
            message: "Balance decremented successfully".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BalanceHistory {
    pub user_id: String,
    pub total_tokens: usize,
    pub balances: BalanceSheet,
    pub timestamp: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClearBalanceResponse {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    pub message: String,
}

impl ClearBalanceResponse {
    pub fn new(user_id: String, token_symbol: Option<String>) -> Self {
        let message = match &token_symbol {
            Some(token) => format!("Balance for {} cleared successfully", token),
            None => "All balances cleared successfully".to_string(),
        };

        Self {
            user_id,
            token_symbol,
            message,
        }
    }
}
