use async_trait::async_trait;
use shared::balance::{BalanceSheet, Ledger, LedgerError};
use shared::error::StorageError;

use crate::appstate::AppState;

#[derive(Clone)]
pub struct BalanceRepo {
    pub(crate) app_state: AppState,
}

#[async_trait]
pub trait BalanceRepoTrait {
    fn new(app_state: AppState) -> Self;

    async fn get_user_balances(
        &self,
        user_id: String,
    ) -> Result<BalanceSheet, StorageError>;

    /// Applies `f` to a freshly loaded ledger and persists it, unless `f`
    /// rejects the change.
    async fn update_ledger<F, T>(
        &self,
        f: F,
    ) -> Result<Result<T, LedgerError>, StorageError>
    where
        F: FnOnce(&mut Ledger) -> Result<T, LedgerError> + Send + 'static,
        T: Send + 'static;
}

#[async_trait]
impl BalanceRepoTrait for BalanceRepo {
    fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    async fn get_user_balances(
        &self,
        user_id: String,
    ) -> Result<BalanceSheet, StorageError> {
        self.app_state
            .interact(move |ledger_file| {
                ledger_file.load().map(|ledger| ledger.balances(&user_id))
            })
            .await
    }

    async fn update_ledger<F, T>(
        &self,
        f: F,
    ) -> Result<Result<T, LedgerError>, StorageError>
    where
        F: FnOnce(&mut Ledger) -> Result<T, LedgerError> + Send + 'static,
        T: Send + 'static,
    {
        self.app_state
            .interact(move |ledger_file| ledger_file.update(f))
            .await
    }
}
