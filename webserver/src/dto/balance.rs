use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct SetBalanceDto {
    #[validate(length(min = 1))]
    pub token_symbol: String,
    pub balance: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct BalanceUpdateDto {
    #[validate(length(min = 1))]
    pub token_symbol: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenQueryParams {
    pub token_symbol: Option<String>,
}

impl TokenQueryParams {
    /// An empty `token_symbol` is the same as none at all.
    pub fn token_symbol(self) -> Option<String> {
        self.token_symbol.filter(|token| !token.is_empty())
    }
}
