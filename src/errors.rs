use std::path::PathBuf;
use thiserror::Error;

use crate::implementations::config::ConfigError;

/// Errors raised while discovering, validating, configuring or building proofs
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("The following proofs were not found: {}", .0.join(", "))]
    ProofsNotFound(Vec<String>),

    #[error("Proof root {} is not a directory", .path.display())]
    ProofRoot { path: PathBuf },

    #[error("The proof marker file name must not be empty")]
    EmptyProofMarker,

    #[error("No proof directories found under {0}")]
    NoProofs(PathBuf),

    #[error(
        "The Makefile in directory '{}' should contain a line like\nPROOF_UID = ...\nwith a unique identifier for the proof.",
        .dir.display()
    )]
    MissingProofUid { dir: PathBuf },

    #[error(
        "The Makefile in directory '{}' should have a different PROOF_UID than the Makefile in directory '{}' (both declare '{uid}')",
        .dir.display(),
        .first.display()
    )]
    DuplicateProofUid { uid: String, dir: PathBuf, first: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    ProofFile { path: PathBuf, source: std::io::Error },

    #[error("Failed to configure the following proofs:\n{}", format_paths(.0))]
    ConfigurationFailed(Vec<PathBuf>),

    #[error("Could not read Litani run file {}: {message}", .path.display())]
    RunFile { path: PathBuf, message: String },

    #[error("Failed to run {tool}: {message}")]
    BuildToolFailed { tool: String, message: String },

    #[error("Could not run make to determine project name: {0}")]
    ProjectName(String),

    #[error("Could not determine path to {tool}: {message}")]
    ToolPath { tool: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Proof worker stopped unexpectedly: {0}")]
    Worker(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type specific to proof runner operations
pub type RunnerResult<T> = Result<T, RunnerError>;

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
