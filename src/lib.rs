pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{RunConfig, RunOverrides};
pub use errors::{RunnerError, RunnerResult};
pub use implementations::config::{ConfigError, FileConfig};
pub use implementations::discovery::discover_proofs;
pub use implementations::litani::Litani;
pub use implementations::make::MakeConfigurer;
pub use implementations::runner::{run_proofs, RunSummary};
pub use implementations::scheduler::ProofScheduler;
pub use implementations::uniqueness::UidRegistry;
pub use models::{
    capability::{CapabilitySet, PoolDeclaration, RestrictMode},
    proof::{ProofUnit, UnitOutcome},
    progress::ProgressCounter,
    run::{LitaniRun, Pipeline},
};
pub use traits::{BuildTool, ProofConfigurer};
