use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

use crate::errors::{RunnerError, RunnerResult};
use crate::models::capability::{CapabilitySet, PoolDeclaration};
use crate::traits::build_tool::BuildTool;

/// Litani, the build tool that runs CBMC proof jobs
#[derive(Debug, Clone)]
pub struct Litani {
    path: PathBuf,
}

impl Litani {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn command(&self, args: &[String]) -> Command {
        debug!("{} {}", self.path.display(), args.join(" "));
        let mut cmd = Command::new(&self.path);
        cmd.args(args);
        cmd
    }

    async fn run(&self, subcommand: &str, args: Vec<String>) -> RunnerResult<()> {
        let status = self.command(&args).status().await.map_err(|e| {
            RunnerError::BuildToolFailed {
                tool: format!("litani {}", subcommand),
                message: e.to_string(),
            }
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(RunnerError::BuildToolFailed {
                tool: format!("litani {}", subcommand),
                message: format!("exited with {}", status),
            })
        }
    }
}

/// Arguments for `litani init`
pub fn init_args(project: &str, pools: &[PoolDeclaration]) -> Vec<String> {
    let mut args = vec!["init".to_string()];
    if !pools.is_empty() {
        args.push("--pools".to_string());
        args.extend(pools.iter().map(ToString::to_string));
    }
    args.push("--project".to_string());
    args.push(project.to_string());
    args
}

/// Arguments for `litani run-build`
pub fn run_build_args(jobs: Option<usize>) -> Vec<String> {
    let mut args = vec!["run-build".to_string()];
    if let Some(jobs) = jobs {
        args.push("-j".to_string());
        args.push(jobs.to_string());
    }
    args
}

#[async_trait]
impl BuildTool for Litani {
    fn describe(&self) -> String {
        format!("Litani at {}", self.path.display())
    }

    async fn capabilities(&self) -> CapabilitySet {
        let output = self
            .command(&["print-capabilities".to_string()])
            .stderr(Stdio::null())
            .output()
            .await;
        let output = match output {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                debug!("litani print-capabilities exited with {}", output.status);
                return CapabilitySet::empty();
            }
            Err(e) => {
                debug!("Could not run litani print-capabilities: {}", e);
                return CapabilitySet::empty();
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        CapabilitySet::from_json(&stdout).unwrap_or_else(|| {
            warn!("Could not load litani capabilities: '{}'", stdout.trim());
            CapabilitySet::empty()
        })
    }

    async fn init(&self, project: &str, pools: &[PoolDeclaration]) -> RunnerResult<()> {
        self.run("init", init_args(project, pools)).await
    }

    async fn run_build(&self, jobs: Option<usize>) -> RunnerResult<()> {
        self.run("run-build", run_build_args(jobs)).await
    }
}
