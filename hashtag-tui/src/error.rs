use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
