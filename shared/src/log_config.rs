use core::fmt;
use std::fmt::Display;

use clap_verbosity_flag::{InfoLevel, LevelFilter as VerbosityLevel, Verbosity};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

#[derive(clap::Parser, Clone, Debug)]
pub struct LogConfig {
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    #[clap(long, env, default_value_t = LogFormat::Text, help = "Logging format")]
    pub log_format: LogFormat,
}

impl LogConfig {
    /// Verbosity flags pick the default level, `RUST_LOG` directives refine
    /// it.
    pub fn filter(&self) -> EnvFilter {
        let level = match self.verbosity.log_level_filter() {
            VerbosityLevel::Off => LevelFilter::OFF,
            VerbosityLevel::Error => LevelFilter::ERROR,
            VerbosityLevel::Warn => LevelFilter::WARN,
            VerbosityLevel::Info => LevelFilter::INFO,
            VerbosityLevel::Debug => LevelFilter::DEBUG,
            VerbosityLevel::Trace => LevelFilter::TRACE,
        };

        EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy()
    }

    pub fn init(&self) {
        let subscriber = tracing_subscriber::fmt().with_env_filter(self.filter());

        match self.log_format {
            LogFormat::Text => subscriber.init(),
            LogFormat::Json => subscriber.json().flatten_event(true).init(),
        };
    }
}
