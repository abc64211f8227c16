use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaceError {
    #[error("engine binary not found at {}", path.display())]
    EngineMissing { path: PathBuf },
    #[error("{0}")]
    InvalidInput(String),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("config error in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl RaceError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RaceError>;
