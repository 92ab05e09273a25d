use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::capability::RestrictMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Settings that may be kept in a YAML file next to the proofs.
///
/// Every field is optional; command line flags take precedence.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Name of the file that marks proof directories
    pub proof_marker: Option<String>,

    /// Project name passed to `litani init`
    pub project_name: Option<String>,

    /// Whether to limit parallelism of expensive jobs
    pub restrict_expensive_jobs: Option<RestrictMode>,

    /// How many expensive jobs may run at once
    pub expensive_jobs_parallelism: Option<usize>,

    /// Number of proofs configured concurrently
    pub configure_jobs: Option<usize>,

    /// Parallelism bound passed to `litani run-build`
    pub parallel_jobs: Option<usize>,

    /// Path to the Litani executable
    pub litani: Option<PathBuf>,
}

impl FileConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: FileConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(marker) = &self.proof_marker {
            if marker.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "proof_marker".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        for (key, value) in [
            ("configure_jobs", self.configure_jobs),
            ("expensive_jobs_parallelism", self.expensive_jobs_parallelism),
        ] {
            if value == Some(0) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}
