use std::path::PathBuf;

use crate::implementations::config::{ConfigError, FileConfig};
use crate::models::capability::RestrictMode;

/// Default name of the file that marks a directory as a proof
pub const DEFAULT_PROOF_MARKER: &str = "cbmc-proof.txt";

/// Placeholder used when the project has not set `PROJECT_NAME`
pub const PLACEHOLDER_PROJECT_NAME: &str = "<PROJECT NAME HERE>";

/// Resolved parameters for one run, fixed before scheduling begins
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub proof_root: PathBuf,
    pub proof_marker: String,
    pub proofs: Option<Vec<String>>,
    pub standalone: bool,
    pub project_name: Option<String>,
    pub restrict_expensive_jobs: RestrictMode,
    pub expensive_jobs_parallelism: usize,
    pub configure_jobs: usize,
    pub parallel_jobs: Option<usize>,
    pub litani: Option<PathBuf>,
}

/// Values supplied on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub proof_root: Option<PathBuf>,
    pub proof_marker: Option<String>,
    pub proofs: Option<Vec<String>>,
    pub no_standalone: bool,
    pub project_name: Option<String>,
    pub restrict_expensive_jobs: Option<RestrictMode>,
    pub expensive_jobs_parallelism: Option<usize>,
    pub configure_jobs: Option<usize>,
    pub parallel_jobs: Option<usize>,
    pub litani: Option<PathBuf>,
}

impl RunConfig {
    /// Merge command line values over file values over defaults
    pub fn resolve(overrides: RunOverrides, file: FileConfig) -> Result<Self, ConfigError> {
        let proof_root = match overrides.proof_root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };

        let proof_marker = overrides
            .proof_marker
            .or(file.proof_marker)
            .unwrap_or_else(|| DEFAULT_PROOF_MARKER.to_string());
        if proof_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "proof_marker".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let configure_jobs = overrides
            .configure_jobs
            .or(file.configure_jobs)
            .unwrap_or_else(default_configure_jobs);
        let expensive_jobs_parallelism = overrides
            .expensive_jobs_parallelism
            .or(file.expensive_jobs_parallelism)
            .unwrap_or(1);
        for (key, value) in [
            ("configure_jobs", configure_jobs),
            ("expensive_jobs_parallelism", expensive_jobs_parallelism),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }

        Ok(Self {
            proof_root,
            proof_marker,
            proofs: overrides.proofs.filter(|p| !p.is_empty()),
            standalone: !overrides.no_standalone,
            project_name: overrides.project_name.or(file.project_name),
            restrict_expensive_jobs: overrides
                .restrict_expensive_jobs
                .or(file.restrict_expensive_jobs)
                .unwrap_or_default(),
            expensive_jobs_parallelism,
            configure_jobs,
            parallel_jobs: overrides.parallel_jobs.or(file.parallel_jobs),
            litani: overrides.litani.or(file.litani),
        })
    }
}

/// Available parallelism less two, leaving room for interactive work
pub fn default_configure_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .map(pool_size_for_cpus)
        .unwrap_or(1)
}

pub(crate) fn pool_size_for_cpus(cpus: usize) -> usize {
    if cpus < 3 {
        1
    } else {
        cpus - 2
    }
}
