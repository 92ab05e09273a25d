use async_trait::async_trait;

use crate::errors::RunnerResult;
use crate::models::capability::{CapabilitySet, PoolDeclaration};

/// The downstream tool that executes configured proof jobs
#[async_trait]
pub trait BuildTool: Send + Sync {
    /// Human-readable identification, used in diagnostics
    fn describe(&self) -> String;

    /// Query advertised features.
    ///
    /// Never fails: a tool that cannot report its capabilities is treated as
    /// supporting none.
    async fn capabilities(&self) -> CapabilitySet;

    /// Start a new build for `project`, declaring the given job pools
    async fn init(&self, project: &str, pools: &[PoolDeclaration]) -> RunnerResult<()>;

    /// Execute every job added since `init`, at most `jobs` at a time
    async fn run_build(&self, jobs: Option<usize>) -> RunnerResult<()>;
}
