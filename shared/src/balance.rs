use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type UserId = String;
pub type TokenSymbol = String;
pub type Amount = f64;

/// Token symbol to amount, for a single user.
pub type BalanceSheet = BTreeMap<TokenSymbol, Amount>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Insufficient balance. Current: {current:?}, Requested: {requested:?}")]
    InsufficientBalance { current: Amount, requested: Amount },
    #[error("User {0} not found")]
    UserNotFound(UserId),
    #[error("Token {token_symbol} not found for user {user_id}")]
    TokenNotFound {
        user_id: UserId,
        token_symbol: TokenSymbol,
    },
    #[error("Resulting balance for {0} is not a finite number")]
    InvalidAmount(TokenSymbol),
}

/// The change applied by an increment or a decrement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceChange {
    pub previous: Amount,
    pub new: Amount,
}

/// Every user's balance sheet. A user with no entry behaves exactly like a
/// user with an empty sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger(BTreeMap<UserId, BalanceSheet>);

impl Ledger {
    pub fn balances(&self, user_id: &str) -> BalanceSheet {
        self.0.get(user_id).cloned().unwrap_or_default()
    }

    pub fn balance(&self, user_id: &str, token_symbol: &str) -> Amount {
        self.0
            .get(user_id)
            .and_then(|sheet| sheet.get(token_symbol))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.0.contains_key(user_id)
    }

    /// Overwrites the balance. The sign of `amount` is not checked.
    pub fn set(&mut self, user_id: &str, token_symbol: &str, amount: Amount) {
        self.0
            .entry(user_id.to_owned())
            .or_default()
            .insert(token_symbol.to_owned(), amount);
    }

    pub fn increment(
        &mut self,
        user_id: &str,
        token_symbol: &str,
        amount: Amount,
    ) -> Result<BalanceChange, LedgerError> {
        let previous = self.balance(user_id, token_symbol);
        let new = previous + amount;

        if !new.is_finite() {
            return Err(LedgerError::InvalidAmount(token_symbol.to_owned()));
        }

        self.set(user_id, token_symbol, new);

        Ok(BalanceChange { previous, new })
    }

    /// Fails without touching the ledger when `amount` exceeds the current
    /// balance.
    pub fn decrement(
        &mut self,
        user_id: &str,
        token_symbol: &str,
        amount: Amount,
    ) -> Result<BalanceChange, LedgerError> {
        let previous = self.balance(user_id, token_symbol);

        if previous < amount {
            return Err(LedgerError::InsufficientBalance {
                current: previous,
                requested: amount,
            });
        }

        let new = previous - amount;

        if !new.is_finite() {
            return Err(LedgerError::InvalidAmount(token_symbol.to_owned()));
        }

        self.set(user_id, token_symbol, new);

        Ok(BalanceChange { previous, new })
    }

    /// Removes the whole sheet of `user_id`.
    pub fn clear_user(
        &mut self,
        user_id: &str,
    ) -> Result<BalanceSheet, LedgerError> {
        self.0
            .remove(user_id)
            .ok_or_else(|| LedgerError::UserNotFound(user_id.to_owned()))
    }

    /// Removes a single token entry, leaving the (possibly empty) user sheet
    /// in place.
    pub fn clear_token(
        &mut self,
        user_id: &str,
        token_symbol: &str,
    ) -> Result<Amount, LedgerError> {
        let sheet = self
            .0
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::UserNotFound(user_id.to_owned()))?;

        sheet
            .remove(token_symbol)
            .ok_or_else(|| LedgerError::TokenNotFound {
                user_id: user_id.to_owned(),
                token_symbol: token_symbol.to_owned(),
            })
    }
}
