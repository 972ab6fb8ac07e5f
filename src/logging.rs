//! Tracing setup.
//!
//! The terminal belongs to the UI while a quiz runs, so log lines only go to
//! a file, and only when one is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::QuizConfig;
use crate::error::QuizError;

/// Install the global subscriber. Returns `false` when logging is disabled.
pub fn init(config: &QuizConfig) -> Result<bool, QuizError> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level().to_string()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| QuizError::Config(format!("logging already initialised: {}", e)))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_log_file() {
        let config = QuizConfig::default();
        assert!(!init(&config).unwrap());
    }
}
