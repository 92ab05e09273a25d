pub mod config;
pub mod discovery;
pub mod litani;
pub mod make;
pub mod pools;
pub mod runner;
pub mod scheduler;
pub mod summary;
pub mod uniqueness;
