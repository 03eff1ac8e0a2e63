//! Generate command implementation

use super::{Command, CommandContext};
use crate::report::{self, ReportPaths};
use crate::utils::Logger;
use anyhow::Result;
use async_trait::async_trait;

/// Analyze a repository and write the static dashboard
pub struct GenerateCommand;

/// Analyze the context repository and write the report into the configured
/// output directory
pub async fn generate_report(context: &CommandContext) -> Result<ReportPaths> {
    let record = context.analyze(false).await?;
    let paths = report::write_report(&record, &context.config.output_path())?;

    let logger = Logger::new();
    logger.success(&format!("Dashboard written to {}", paths.index.display()));
    logger.info(&format!("Metrics snapshot: {}", paths.data.display()));

    Ok(paths)
}

#[async_trait]
impl Command for GenerateCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        generate_report(context).await?;
        Ok(())
    }
}
