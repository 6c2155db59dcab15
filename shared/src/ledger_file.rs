use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::balance::{Ledger, LedgerError};
use crate::error::{AsReadError, AsWriteError, StorageError};

/// The ledger persisted as a single pretty-printed JSON document.
///
/// Nothing is cached: every call to [`LedgerFile::load`] goes back to disk.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing, empty or malformed file is an empty ledger. Any other
    /// read failure is returned.
    pub fn load(&self) -> Result<Ledger, StorageError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "Ledger file not found, starting empty"
                );
                return Ok(Ledger::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| {
                        format!("Failed to read {}", self.path.display())
                    })
                    .into_read_error();
            }
        };

        Ok(self.parse(&raw))
    }

    fn parse(&self, raw: &[u8]) -> Ledger {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ledger::default();
        }

        match serde_json::from_slice::<Ledger>(raw) {
            Ok(ledger) => ledger,
            Err(reason) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %reason,
                    "Malformed ledger file, treating it as empty"
                );
                Ledger::default()
            }
        }
    }

    /// Writes the full ledger to a sibling temp file and renames it over
    /// the ledger file.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StorageError> {
        self.write(ledger).into_write_error()
    }

    fn write(&self, ledger: &Ledger) -> anyhow::Result<()> {
        let parent = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = parent {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create directory {}", dir.display())
            })?;
        }

        let json = serde_json::to_string_pretty(ledger)
            .context("Failed to serialize ledger")?;

        let tmp_path = self.tmp_path();
        let mut tmp = fs::File::create(&tmp_path).with_context(|| {
            format!("Failed to create {}", tmp_path.display())
        })?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.sync_all())
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!("Failed to replace {}", self.path.display())
        })?;

        anyhow::Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ledger.json".to_string());

        self.path.with_file_name(format!(".{file_name}.tmp"))
    }

    /// Loads the ledger, applies `f` and persists the result. When `f`
    /// rejects the mutation nothing is written.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut Ledger) -> Result<T, LedgerError>,
    ) -> Result<Result<T, LedgerError>, StorageError> {
        let mut ledger = self.load()?;

        match f(&mut ledger) {
            Ok(value) => {
                self.save(&ledger)?;
                Ok(Ok(value))
            }
            Err(e) => Ok(Err(e)),
        }
    }
}
