//! Base types and traits for the command pattern

use crate::analysis::{AnalyzerOptions, MetricsRecord, RepositoryAnalyzer};
use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Context passed to all commands containing shared configuration and options
#[derive(Clone)]
pub struct CommandContext {
    /// The loaded configuration with command line overrides applied
    pub config: Config,
    /// Root of the repository to analyze
    pub repo_path: PathBuf,
}

impl CommandContext {
    /// Run a full analysis of the context repository
    pub async fn analyze(&self, quiet: bool) -> Result<MetricsRecord> {
        let options = AnalyzerOptions {
            quiet,
            ..AnalyzerOptions::from(&self.config)
        };
        let analyzer = RepositoryAnalyzer::new(&self.repo_path, options)?;
        Ok(analyzer.analyze().await)
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
