use thiserror::Error;

use crate::analysis::AnalyzerKind;

pub type Result<T> = std::result::Result<T, AppError>;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{analyzer} worker failed before responding: {reason}")]
    ExecutionFailure {
        analyzer: AnalyzerKind,
        reason: String,
    },
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub(crate) fn execution_failure(analyzer: AnalyzerKind, reason: impl Into<String>) -> Self {
        AppError::ExecutionFailure {
            analyzer,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AppError::InvalidInput(_))
    }

    pub fn is_execution_failure(&self) -> bool {
        matches!(self, AppError::ExecutionFailure { .. })
    }
}
