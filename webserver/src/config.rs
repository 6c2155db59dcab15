use core::fmt;
use std::fmt::Display;
use std::path::PathBuf;

use shared::log_config::LogConfig;

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum CargoEnv {
    Development,
    Production,
}

impl Display for CargoEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(clap::Parser, Clone, Debug)]
pub struct AppConfig {
    #[clap(long, env, value_enum, default_value = "development")]
    pub cargo_env: CargoEnv,

    #[clap(long, env, default_value = "5000")]
    pub port: u16,

    #[clap(long, env, default_value = "./data/token_balances.json")]
    pub ledger_path: PathBuf,

    /// Requests per second, unlimited when unset
    #[clap(long, env)]
    pub rps: Option<u64>,

    /// Per request timeout, in seconds
    #[clap(long, env, default_value_t = 60)]
    pub http_timeout: u64,

    #[command(flatten)]
    pub log: LogConfig,
}
