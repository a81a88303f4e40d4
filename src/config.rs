use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use thiserror::Error;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "receipt-tui",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse a folder of YAML receipts in the terminal"
)]
pub struct Cli {
    /// Folder holding the receipt files.
    #[arg(value_name = "FOLDER", default_value = "./receipts/")]
    pub folder: PathBuf,

    /// Append log output to this file. Logging is discarded when unset.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Minimum level written to the log file (error, warn, info, debug, trace).
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("receipt folder {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub folder: PathBuf,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl TryFrom<&Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !cli.folder.is_dir() {
            return Err(ConfigError::NotADirectory(cli.folder.clone()));
        }
        let log_level = Level::from_str(&cli.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(cli.log_level.clone()))?;
        Ok(Self {
            folder: cli.folder.clone(),
            log_file: cli.log_file.clone(),
            log_level,
        })
    }
}
