use chrono::{SecondsFormat, Utc};
use shared::balance::{Amount, BalanceChange, BalanceSheet};

use crate::appstate::AppState;
use crate::error::balance::BalanceError;
use crate::repository::balance::{BalanceRepo, BalanceRepoTrait};
use crate::response::balance::BalanceHistory;

#[derive(Clone)]
pub struct BalanceService {
    pub balance_repo: BalanceRepo,
}

impl BalanceService {
    pub fn new(app_state: AppState) -> Self {
        Self {
            balance_repo: BalanceRepo::new(app_state),
        }
    }

    pub async fn get_balances(
        &self,
        user_id: String,
    ) -> Result<BalanceSheet, BalanceError> {
        let balances = self.balance_repo.get_user_balances(user_id).await?;

        Ok(balances)
    }

    pub async fn get_balance(
        &self,
        user_id: String,
        token_symbol: &str,
    ) -> Result<Amount, BalanceError> {
        let balances = self.balance_repo.get_user_balances(user_id).await?;

        Ok(balances.get(token_symbol).copied().unwrap_or(0.0))
    }

    pub async fn set_balance(
        &self,
        user_id: String,
        token_symbol: String,
        amount: Amount,
    ) -> Result<(), BalanceError> {
        self.balance_repo
            .update_ledger(move |ledger| {
                ledger.set(&user_id, &token_symbol, amount);
                tracing::debug!(%user_id, %token_symbol, amount, "Balance set");
                Ok(())
            })
            .await??;

        Ok(())
    }

    pub async fn increment_balance(
        &self,
        user_id: String,
        token_symbol: String,
        amount: Amount,
    ) -> Result<BalanceChange, BalanceError> {
        let change = self
            .balance_repo
            .update_ledger(move |ledger| {
                ledger.increment(&user_id, &token_symbol, amount)
            })
            .await??;

        tracing::debug!(
            previous = change.previous,
            new = change.new,
            "Balance incremented"
        );

        Ok(change)
    }

    pub async fn decrement_balance(
        &self,
        user_id: String,
        token_symbol: String,
        amount: Amount,
    ) -> Result<BalanceChange, BalanceError> {
        let change = self
            .balance_repo
            .update_ledger(move |ledger| {
                ledger.decrement(&user_id, &token_symbol, amount)
            })
            .await??;

        tracing::debug!(
            previous = change.previous,
            new = change.new,
            "Balance decremented"
        );

        Ok(change)
    }

    /// Clears a single token when `token_symbol` is given, otherwise the
    /// whole user entry.
    pub async fn clear_balances(
        &self,
        user_id: String,
        token_symbol: Option<String>,
    ) -> Result<(), BalanceError> {
        self.balance_repo
            .update_ledger(move |ledger| match token_symbol {
                Some(token_symbol) => {
                    ledger.clear_token(&user_id, &token_symbol).map(|_| ())
                }
                None => ledger.clear_user(&user_id).map(|_| ()),
            })
            .await??;

        Ok(())
    }

    pub async fn get_history(
        &self,
        user_id: String,
    ) -> Result<BalanceHistory, BalanceError> {
        let balances =
            self.balance_repo.get_user_balances(user_id.clone()).await?;

        Ok(BalanceHistory {
            user_id,
            total_tokens: balances.len(),
            balances,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use test_helpers::ledger::TestLedger;

    use super::*;

    fn service(path: PathBuf) -> BalanceService {
        BalanceService::new(AppState::new(path))
    }

    #[tokio::test]
    async fn test_unknown_user_reads_zero() {
        let ledger = TestLedger::new();
        let service = service(ledger.path());

        let balance = service
            .get_balance("nobody".to_string(), "HBAR")
            .await
            .unwrap();
        let balances = service.get_balances("nobody".to_string()).await.unwrap();

        assert_eq!(balance, 0.0);
        assert!(balances.is_empty());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let ledger = TestLedger::new();
        let service = service(ledger.path());

        service
            .set_balance("alice".to_string(), "HBAR".to_string(), 12.75)
            .await
            .unwrap();

        let balance = service
            .get_balance("alice".to_string(), "HBAR")
            .await
            .unwrap();
        assert_eq!(balance, 12.75);
    }

    #[tokio::test]
    async fn test_two_increments_sum() {
        let ledger = TestLedger::new();
        let service = service(ledger.path());

        service
            .increment_balance("alice".to_string(), "USDC".to_string(), 3.5)
            .await
            .unwrap();
        let change = service
            .increment_balance("alice".to_string(), "USDC".to_string(), 4.0)
            .await
            .unwrap();

        assert_eq!(change.previous, 3.5);
        assert_eq!(change.new, 7.5);
        assert_eq!(ledger.read().balance("alice", "USDC"), 7.5);
    }

    #[tokio::test]
    async fn test_insufficient_decrement_leaves_balance() {
        let ledger = TestLedger::new();
        let service = service(ledger.path());
        service
            .set_balance("alice".to_string(), "HBAR".to_string(), 150.0)
            .await
            .unwrap();

        let result = service
            .decrement_balance("alice".to_string(), "HBAR".to_string(), 200.0)
            .await;

        assert!(matches!(
            result,
            Err(BalanceError::InsufficientBalance {
                current,
                requested
            }) if current == 150.0 && requested == 200.0
        ));
        let balance = service
            .get_balance("alice".to_string(), "HBAR")
            .await
            .unwrap();
        assert_eq!(balance, 150.0);
    }

    #[tokio::test]
    async fn test_clear_user_then_clear_again_fails() {
        let ledger = TestLedger::new();
        let service = service(ledger.path());
        service
            .set_balance("alice".to_string(), "HBAR".to_string(), 1.0)
            .await
            .unwrap();

        service
            .clear_balances("alice".to_string(), None)
            .await
            .unwrap();

        assert!(service
            .get_balances("alice".to_string())
            .await
            .unwrap()
            .is_empty());
        assert!(matches!(
            service.clear_balances("alice".to_string(), None).await,
            Err(BalanceError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_clear_missing_token_fails() {
        let ledger = TestLedger::new();
        let service = service(ledger.path());
        service
            .set_balance("alice".to_string(), "HBAR".to_string(), 1.0)
            .await
            .unwrap();

        let result = service
            .clear_balances("alice".to_string(), Some("USDC".to_string()))
            .await;

        assert!(matches!(
            result,
            Err(BalanceError::TokenNotFound(token)) if token == "USDC"
        ));
        assert_eq!(ledger.read().balance("alice", "HBAR"), 1.0);
    }

    #[tokio::test]
    async fn test_history_counts_tokens() {
        let ledger = TestLedger::new();
        let service = service(ledger.path());
        for (token, amount) in [("HBAR", 1.0), ("USDC", 2.0), ("HBARX", 3.0)] {
            service
                .set_balance("alice".to_string(), token.to_string(), amount)
                .await
                .unwrap();
        }

        let history = service.get_history("alice".to_string()).await.unwrap();

        assert_eq!(history.total_tokens, 3);
        assert_eq!(history.balances.get("HBARX"), Some(&3.0));
        assert!(chrono::DateTime::parse_from_rfc3339(&history.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_values_survive_a_new_process() {
        let ledger = TestLedger::new();
        service(ledger.path())
            .set_balance("alice".to_string(), "HBAR".to_string(), 99.0)
            .await
            .unwrap();

        let restarted = service(ledger.path());

        let balance = restarted
            .get_balance("alice".to_string(), "HBAR")
            .await
            .unwrap();
        assert_eq!(balance, 99.0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let ledger = TestLedger::new();
        let service = service(ledger.path());

        let tasks = (0..50)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .increment_balance(
                            "alice".to_string(),
                            "HBAR".to_string(),
                            1.0,
                        )
                        .await
                })
            })
            .collect::<Vec<_>>();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(ledger.read().balance("alice", "HBAR"), 50.0);
    }
}
