use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, info};

use crate::config::RunConfig;
use crate::errors::{RunnerError, RunnerResult};
use crate::implementations::discovery::discover_proofs;
use crate::implementations::pools::detect_pools;
use crate::implementations::scheduler::ProofScheduler;
use crate::models::capability::PoolDeclaration;
use crate::models::progress::ProgressCounter;
use crate::traits::build_tool::BuildTool;
use crate::traits::proof_configurer::ProofConfigurer;

/// What a successful run did
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub counter: ProgressCounter,
    pub pools_enabled: bool,
    pub build_triggered: bool,
}

/// Discover, configure and build every proof under the configured root.
///
/// In standalone mode the build tool is initialised for `project_name`
/// before any proof is configured and `run-build` is invoked once all
/// proofs configured cleanly. Otherwise both are left to the caller.
pub async fn run_proofs<B, C>(
    config: &RunConfig,
    project_name: &str,
    tool: &B,
    configurer: Arc<C>,
    progress: &ProgressBar,
) -> RunnerResult<RunSummary>
where
    B: BuildTool + ?Sized,
    C: ProofConfigurer + ?Sized + 'static,
{
    let units = discover_proofs(
        &config.proof_root,
        &config.proof_marker,
        config.proofs.as_deref(),
    )?;
    if units.is_empty() {
        return Err(RunnerError::NoProofs(config.proof_root.clone()));
    }
    info!("Found {} proof directories", units.len());

    let pools_enabled = detect_pools(tool, config.restrict_expensive_jobs).await;
    debug!("Expensive job pool enabled: {}", pools_enabled);

    if config.standalone {
        let pools = if pools_enabled {
            vec![PoolDeclaration::expensive(config.expensive_jobs_parallelism)]
        } else {
            Vec::new()
        };
        tool.init(project_name, &pools).await?;
    }

    let scheduler = ProofScheduler::new(configurer, config.configure_jobs, pools_enabled);
    let counter = scheduler.configure_all(units, progress).await?;
    progress.finish();

    if !counter.failed.is_empty() {
        return Err(RunnerError::ConfigurationFailed(counter.failed));
    }

    let build_triggered = if config.standalone {
        tool.run_build(config.parallel_jobs).await?;
        true
    } else {
        false
    };

    Ok(RunSummary {
        counter,
        pools_enabled,
        build_triggered,
    })
}
