use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

use crate::config::PLACEHOLDER_PROJECT_NAME;
use crate::errors::{RunnerError, RunnerResult};
use crate::models::proof::UnitOutcome;
use crate::traits::proof_configurer::ProofConfigurer;

/// Makefile shared by every proof, holding project-wide queries
pub const MAKEFILE_COMMON: &str = "Makefile.common";

/// Niceness applied to proof configuration so interactive work can preempt it
pub const CONFIGURE_NICENESS: i32 = 15;

/// Configures a proof by running `make _report` in its directory
#[derive(Debug, Clone)]
pub struct MakeConfigurer {
    niceness: i32,
    target: String,
}

impl Default for MakeConfigurer {
    fn default() -> Self {
        Self {
            niceness: CONFIGURE_NICENESS,
            target: "_report".to_string(),
        }
    }
}

impl MakeConfigurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full argument vector, starting with the program to execute
    pub fn argv(&self, enable_pools: bool) -> Vec<String> {
        let mut argv = vec![
            "nice".to_string(),
            "-n".to_string(),
            self.niceness.to_string(),
            "make".to_string(),
        ];
        if enable_pools {
            argv.push("ENABLE_POOLS=true".to_string());
        }
        argv.extend(["-B", "--quiet"].map(String::from));
        argv.push(self.target.clone());
        argv
    }
}

#[async_trait]
impl ProofConfigurer for MakeConfigurer {
    async fn configure(&self, dir: &Path, enable_pools: bool) -> RunnerResult<UnitOutcome> {
        let argv = self.argv(enable_pools);
        debug!("{}: {}", dir.display(), argv.join(" "));
        let status = Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(dir)
            .stdin(Stdio::null())
            .status()
            .await?;
        Ok(if status.success() {
            UnitOutcome::Succeeded
        } else {
            UnitOutcome::Failed
        })
    }
}

async fn query_makefile(proof_root: &Path, args: &[String]) -> std::io::Result<(bool, String)> {
    debug!("make {}", args.join(" "));
    let output = Command::new("make")
        .args(args)
        .current_dir(proof_root)
        .stderr(Stdio::inherit())
        .output()
        .await?;
    Ok((
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
    ))
}

/// Read `PROJECT_NAME` through `make echo-project-name`.
///
/// An unset name falls back to a placeholder with a warning.
pub async fn project_name(proof_root: &Path) -> RunnerResult<String> {
    let args = ["-f", MAKEFILE_COMMON, "echo-project-name"].map(String::from);
    let (ok, stdout) = query_makefile(proof_root, &args)
        .await
        .map_err(|e| RunnerError::ProjectName(e.to_string()))?;
    if !ok {
        return Err(RunnerError::ProjectName("make echo-project-name failed".to_string()));
    }
    if stdout.is_empty() {
        warn!(
            "project name has not been set; using generic name instead. Set the PROJECT_NAME value in Makefile-project-defines to remove this warning"
        );
        return Ok(PLACEHOLDER_PROJECT_NAME.to_string());
    }
    Ok(stdout)
}

/// Locate the Litani executable through `make litani-path`
pub async fn litani_path(proof_root: &Path) -> RunnerResult<PathBuf> {
    let args = vec![
        format!("PROOF_ROOT={}", proof_root.display()),
        "-f".to_string(),
        MAKEFILE_COMMON.to_string(),
        "litani-path".to_string(),
    ];
    let failed = |message: String| RunnerError::ToolPath {
        tool: "litani".to_string(),
        message,
    };
    let (ok, stdout) = query_makefile(proof_root, &args)
        .await
        .map_err(|e| failed(e.to_string()))?;
    if !ok || stdout.is_empty() {
        return Err(failed("make litani-path failed".to_string()));
    }
    Ok(PathBuf::from(stdout))
}
