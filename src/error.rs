use std::io;

use thiserror::Error;

use crate::data::LoadError;

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error loading questions from file.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// IO error while driving the terminal or opening the log file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Rejected configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
