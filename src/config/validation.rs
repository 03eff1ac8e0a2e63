//! Configuration validation utilities

use super::Config;
use crate::constants;
use anyhow::anyhow;

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Output directory is empty or whitespace-only
    EmptyOutputDir,
    /// Server port is zero
    InvalidPort,
    /// Server host is empty
    EmptyHost,
    /// Timeout outside the accepted range (field name, value)
    TimeoutOutOfRange(&'static str, u64),
    /// Ignore entry is empty
    EmptyIgnoreEntry,
    /// Ignore entry contains a path separator
    IgnoreEntryIsPath(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyOutputDir => write!(f, "output_dir cannot be empty"),
            ValidationError::InvalidPort => write!(f, "port must be greater than zero"),
            ValidationError::EmptyHost => write!(f, "host cannot be empty"),
            ValidationError::TimeoutOutOfRange(field, value) => write!(
                f,
                "{} must be between 1 and {} seconds, got {}",
                field,
                constants::config::MAX_TIMEOUT_SECS,
                value
            ),
            ValidationError::EmptyIgnoreEntry => write!(f, "ignore entries cannot be empty"),
            ValidationError::IgnoreEntryIsPath(entry) => write!(
                f,
                "ignore entry '{}' must be a directory name, not a path",
                entry
            ),
        }
    }
}

/// Validates a complete configuration object, collecting every problem
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.output_dir.trim().is_empty() {
        errors.push(ValidationError::EmptyOutputDir);
    }
    if config.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }
    if config.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    for (field, value) in [
        ("git_timeout_secs", config.git_timeout_secs),
        ("log_timeout_secs", config.log_timeout_secs),
    ] {
        if !(1..=constants::config::MAX_TIMEOUT_SECS).contains(&value) {
            errors.push(ValidationError::TimeoutOutOfRange(field, value));
        }
    }

    for entry in &config.ignore {
        if entry.trim().is_empty() {
            errors.push(ValidationError::EmptyIgnoreEntry);
        } else if entry.contains('/') || entry.contains('\\') {
            errors.push(ValidationError::IgnoreEntryIsPath(entry.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Convert validation errors to anyhow::Error for compatibility
pub fn validation_errors_to_anyhow(errors: Vec<ValidationError>) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    anyhow!("Invalid configuration:\n  - {}", messages.join("\n  - "))
}
