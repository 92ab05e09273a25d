pub mod build_tool;
pub mod proof_configurer;

// Re-export traits
pub use build_tool::BuildTool;
pub use proof_configurer::ProofConfigurer;
