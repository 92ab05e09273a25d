pub mod capability;
pub mod proof;
pub mod progress;
pub mod run;

// Re-export common model types
pub use capability::{CapabilitySet, PoolDeclaration, RestrictMode};
pub use proof::{ProofUnit, UnitOutcome};
pub use progress::ProgressCounter;
pub use run::{LitaniRun, Pipeline};
