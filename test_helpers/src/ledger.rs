use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::{fs, thread};

use shared::balance::Ledger;
use shared::ledger_file::LedgerFile;
use tempfile::TempDir;

static TEST_LEDGER_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A ledger file inside its own temporary directory. The directory is
/// removed on drop unless the test panicked.
pub struct TestLedger {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl TestLedger {
    pub fn new() -> Self {
        let name = format!(
            "test_ledger_{}_{}",
            std::process::id(),
            TEST_LEDGER_COUNTER.fetch_add(1, Ordering::SeqCst)
        );
        let dir = tempfile::Builder::new()
            .prefix(&name)
            .tempdir()
            .expect("Failed to create test ledger directory");
        let path = dir.path().join("data").join("token_balances.json");

        Self {
            dir: Some(dir),
            path,
        }
    }

    /// Starts from an existing ledger document.
    pub fn with_ledger(ledger: &Ledger) -> Self {
        let test_ledger = Self::new();
        test_ledger
            .file()
            .save(ledger)
            .expect("Failed to seed test ledger");
        test_ledger
    }

    /// Starts from raw file contents, valid JSON or not.
    pub fn with_contents(contents: &str) -> Self {
        let test_ledger = Self::new();
        if let Some(dir) = test_ledger.path.parent() {
            fs::create_dir_all(dir).expect("Failed to create data directory");
        }
        fs::write(&test_ledger.path, contents)
            .expect("Failed to seed test ledger");
        test_ledger
    }

    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }

    pub fn file(&self) -> LedgerFile {
        LedgerFile::new(self.path.clone())
    }

    /// Reads the document straight from disk.
    pub fn read(&self) -> Ledger {
        self.file().load().expect("Failed to read test ledger")
    }
}

impl Drop for TestLedger {
    fn drop(&mut self) {
        if thread::panicking() {
            if let Some(dir) = self.dir.take() {
                let kept = dir.keep();
                eprintln!("TestLedger leaking directory {}", kept.display());
            }
        }
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}
