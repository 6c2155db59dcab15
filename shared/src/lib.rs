pub mod balance;
pub mod error;
pub mod ledger_file;
pub mod log_config;
