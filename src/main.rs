use anyhow::Result;
use clap::{Parser, Subcommand};
use repodash::commands::*;
use repodash::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repodash")]
#[command(about = "Analyze a repository and generate a static metrics dashboard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a repository and print a summary
    Analyze {
        /// Repository root to analyze
        #[arg(short, long, default_value = ".")]
        repo: PathBuf,

        /// Configuration file path (defaults to repodash.yaml when present)
        #[arg(short, long)]
        config: Option<String>,

        /// Print the full metrics record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a repository and write the dashboard files
    Generate {
        /// Repository root to analyze
        #[arg(short, long, default_value = ".")]
        repo: PathBuf,

        /// Configuration file path (defaults to repodash.yaml when present)
        #[arg(short, long)]
        config: Option<String>,

        /// Output directory for index.html and data.json
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Generate the dashboard and serve it locally
    Serve {
        /// Repository root to analyze
        #[arg(short, long, default_value = ".")]
        repo: PathBuf,

        /// Configuration file path (defaults to repodash.yaml when present)
        #[arg(short, long)]
        config: Option<String>,

        /// Output directory for index.html and data.json
        #[arg(short, long)]
        out: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Open the dashboard in the default browser
        #[arg(long)]
        open: bool,
    },
}

fn build_context(
    repo: PathBuf,
    config: Option<String>,
    out: Option<String>,
    port: Option<u16>,
    host: Option<String>,
) -> Result<CommandContext> {
    let config = Config::load_or_default(config.as_deref())?.with_overrides(out, port, host)?;

    Ok(CommandContext {
        config,
        repo_path: repo,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { repo, config, json } => {
            let context = build_context(repo, config, None, None, None)?;
            AnalyzeCommand { json }.execute(&context).await?;
        }
        Commands::Generate { repo, config, out } => {
            let context = build_context(repo, config, out, None, None)?;
            GenerateCommand.execute(&context).await?;
        }
        Commands::Serve {
            repo,
            config,
            out,
            port,
            host,
            open,
        } => {
            let context = build_context(repo, config, out, port, host)?;
            ServeCommand { open }.execute(&context).await?;
        }
    }

    Ok(())
}
