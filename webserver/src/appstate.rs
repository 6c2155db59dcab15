use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use shared::error::{AsTaskJoinError, StorageError};
use shared::ledger_file::LedgerFile;

/// Owns the ledger file. All access goes through [`AppState::interact`],
/// which holds the lock for the whole closure so read-modify-write cycles
/// never interleave.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<Mutex<LedgerFile>>,
}

impl AppState {
    pub fn new(ledger_path: PathBuf) -> Self {
        tracing::info!(path = %ledger_path.display(), "Using ledger file");

        Self {
            ledger: Arc::new(Mutex::new(LedgerFile::new(ledger_path))),
        }
    }

    /// Runs `f` on the blocking pool with exclusive access to the ledger
    /// file.
    pub async fn interact<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&LedgerFile) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let ledger = self.ledger.clone();

        tokio::task::spawn_blocking(move || {
            let ledger_file =
                ledger.lock().map_err(|_| StorageError::LockPoisoned)?;
            f(&*ledger_file)
        })
        .await
        .into_task_join_error()?
    }
}
