use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

use cbmc_proof_runner::implementations::make;
use cbmc_proof_runner::{ run_proofs, FileConfig, Litani, MakeConfigurer, RunConfig };

use crate::cli::ui;
use crate::cli::RunArgs;

/// Proof configuration and build command
pub async fn execute(args: &RunArgs, config_path: Option<&Path>) -> Result<()> {
    let file_config = match config_path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            FileConfig::from_file(path)?
        }
        None => FileConfig::default(),
    };
    let config = RunConfig::resolve(args.overrides(), file_config)?;
    info!("Proof root: {}", config.proof_root.display());

    // Environment discovery happens before any proof is touched
    let litani_path = match &config.litani {
        Some(path) => path.clone(),
        None => make::litani_path(&config.proof_root).await?,
    };
    let project_name = match (&config.project_name, config.standalone) {
        (Some(name), _) => name.clone(),
        (None, true) => make::project_name(&config.proof_root).await?,
        (None, false) => String::new(),
    };

    let litani = Litani::new(litani_path);
    info!("Using Litani at {}", litani.path().display());
    let progress = ui::configure_progress();
    let summary = run_proofs(
        &config,
        &project_name,
        &litani,
        Arc::new(MakeConfigurer::new()),
        &progress,
    ).await;
    // Leave the final progress line in place before any diagnostics
    progress.abandon();
    let summary = summary?;

    ui::print_success(
        &format!("Configured {} CBMC proofs", summary.counter.succeeded.len())
    );
    if summary.build_triggered {
        ui::print_info("Litani build completed");
    } else {
        ui::print_info("Run `litani run-build` to execute the configured proofs");
    }
    Ok(())
}
