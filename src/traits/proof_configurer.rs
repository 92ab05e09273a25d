use std::path::Path;

use async_trait::async_trait;

use crate::errors::RunnerResult;
use crate::models::proof::UnitOutcome;

/// Adds the jobs of one proof directory to the current build
#[async_trait]
pub trait ProofConfigurer: Send + Sync {
    /// Configure the proof in `dir`.
    ///
    /// `enable_pools` asks for expensive jobs to be placed in the restricted
    /// pool. An `Err` means the command could not be started at all.
    async fn configure(&self, dir: &Path, enable_pools: bool) -> RunnerResult<UnitOutcome>;
}
