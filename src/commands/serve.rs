//! Serve command implementation

use super::generate::generate_report;
use super::{Command, CommandContext};
use crate::report::StaticServer;
use crate::utils::{Logger, open_in_browser};
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Generate the dashboard and serve it over HTTP until interrupted
pub struct ServeCommand {
    /// Open the dashboard in the default browser once listening
    pub open: bool,
}

#[async_trait]
impl Command for ServeCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        generate_report(context).await?;

        let config = &context.config;
        let server = StaticServer::bind(config.output_path(), &config.host, config.port).await?;
        let url = server.url()?;

        println!(
            "{} {}",
            "Serving dashboard at".green(),
            url.cyan().bold()
        );
        println!("{}", "Press Ctrl+C to stop".dimmed());

        if self.open
            && let Err(e) = open_in_browser(&url)
        {
            Logger::new().warn(&format!("{:#}", e));
        }

        tokio::select! {
            result = server.run() => result,
            _ = tokio::signal::ctrl_c() => {
                println!();
                Logger::new().info("Server stopped");
                Ok(())
            }
        }
    }
}
