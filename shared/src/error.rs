use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Can't read ledger file: {0}")]
    Read(String),
    #[error("Can't write ledger file: {0}")]
    Write(String),
    #[error("Ledger lock poisoned")]
    LockPoisoned,
    #[error("Failed to join ledger task")]
    TaskJoinError,
}

pub trait AsReadError<T> {
    fn into_read_error(self) -> Result<T, StorageError>;
}

impl<T> AsReadError<T> for anyhow::Result<T> {
    #[inline]
    fn into_read_error(self) -> Result<T, StorageError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "Ledger read error");
            StorageError::Read(format!("{reason:#}"))
        })
    }
}

pub trait AsWriteError<T> {
    fn into_write_error(self) -> Result<T, StorageError>;
}

impl<T> AsWriteError<T> for anyhow::Result<T> {
    #[inline]
    fn into_write_error(self) -> Result<T, StorageError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "Ledger write error");
            StorageError::Write(format!("{reason:#}"))
        })
    }
}

pub trait AsTaskJoinError<T> {
    fn into_task_join_error(self) -> Result<T, StorageError>;
}

impl<T, E: std::fmt::Debug> AsTaskJoinError<T> for Result<T, E> {
    #[inline]
    fn into_task_join_error(self) -> Result<T, StorageError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "{}", StorageError::TaskJoinError);
            StorageError::TaskJoinError
        })
    }
}
