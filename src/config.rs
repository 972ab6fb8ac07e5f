//! Runtime configuration.

use std::path::PathBuf;

use crate::data::DEFAULT_QUESTIONS_PATH;
use crate::error::QuizError;
use crate::session::DEFAULT_SAMPLE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// JSON question bank.
    pub questions_path: PathBuf,
    /// Maximum number of questions drawn per run.
    pub sample_size: usize,
    /// Seed for the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Where tracing output goes. Nothing is logged without it.
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_path: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
            log_file: None,
            verbose: false,
        }
    }
}

impl QuizConfig {
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.sample_size == 0 {
            return Err(QuizError::Config(
                "sample size must be at least 1".to_string(),
            ));
        }
        if self.questions_path.as_os_str().is_empty() {
            return Err(QuizError::Config(
                "questions path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Default log level when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = QuizConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sample_size, 60);
        assert_eq!(config.questions_path, PathBuf::from("questions.json"));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_validate_rejects_zero_sample() {
        let config = QuizConfig {
            sample_size: 0,
            ..QuizConfig::default()
        };
        assert!(matches!(config.validate(), Err(QuizError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let config = QuizConfig {
            questions_path: PathBuf::new(),
            verbose: true,
            ..QuizConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.log_level(), "debug");
    }
}
