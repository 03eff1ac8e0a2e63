//! Repodash - Repository analysis and static dashboard generation
//!
//! Scans a repository's history, source tree, tests, manifests and CI
//! configuration into a single [`MetricsRecord`], then renders that record
//! as a self-contained HTML dashboard.

pub mod analysis;
pub mod commands;
pub mod config;
pub mod constants;
pub mod git;
pub mod report;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use analysis::{AnalyzerOptions, MetricsRecord, RepositoryAnalyzer};
pub use commands::{Command, CommandContext};
pub use config::Config;
