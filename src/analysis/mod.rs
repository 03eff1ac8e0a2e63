//! Repository analysis engine
//!
//! A run consists of independent passes executed one after another. Each pass
//! returns its own section of the [`MetricsRecord`]; the analyzer assembles
//! the record only once every pass has finished, so a partially populated
//! record is never exposed.
//!
//! ## Passes
//!
//! 1. VCS history ([`crate::git::read_history`])
//! 2. Code structure ([`CodeScanner`])
//! 3. Test artifacts ([`TestDetector`], consumes the code summary)
//! 4. Dependency manifests ([`dependencies::read_manifests`])
//! 5. File inventory ([`InventoryBuilder`])
//! 6. CI configuration ([`ci::read_ci_config`])
//! 7. Quality metrics ([`quality::derive`], consumes the VCS summary)

pub mod ci;
pub mod code;
pub mod dependencies;
pub mod inventory;
pub mod quality;
pub mod testing;
pub mod types;
pub mod walker;

pub use code::CodeScanner;
pub use inventory::InventoryBuilder;
pub use testing::TestDetector;
pub use types::{
    CiSummary, CodeSummary, CommitEntry, DependencySummary, ExtensionStats, FileInventory,
    LargeFile, LocBreakdown, MainFile, MetricsRecord, QualityMetrics, RepositoryIdentity,
    TestFile, TestSummary, VcsSummary,
};

use crate::config::Config;
use crate::git;
use crate::utils::{Logger, filesystem};
use anyhow::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables for one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub query_timeout: Duration,
    pub log_timeout: Duration,
    /// Directory names pruned by every walker in addition to its own list
    pub extra_ignored: Vec<String>,
    pub quiet: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AnalyzerOptions {
    fn from(config: &Config) -> Self {
        Self {
            query_timeout: config.git_timeout(),
            log_timeout: config.log_timeout(),
            extra_ignored: config.ignore.clone(),
            quiet: false,
        }
    }
}

/// Main repository analyzer - runs every pass and assembles the record
pub struct RepositoryAnalyzer {
    root: PathBuf,
    options: AnalyzerOptions,
    logger: Logger,
}

impl RepositoryAnalyzer {
    /// Fails when `repo_root` does not exist or is not a directory
    pub fn new(repo_root: impl AsRef<Path>, options: AnalyzerOptions) -> Result<Self> {
        let root = filesystem::resolve_repository_root(repo_root.as_ref())?;
        let logger = if options.quiet {
            Logger::quiet()
        } else {
            Logger::new()
        };

        Ok(Self {
            root,
            options,
            logger,
        })
    }

    fn identity(&self) -> RepositoryIdentity {
        RepositoryIdentity {
            repo_name: self
                .root
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| self.root.to_string_lossy().to_string()),
            repo_path: self.root.to_string_lossy().to_string(),
            scanned_at: Utc::now(),
        }
    }

    /// Run every pass in order. Pass failures degrade their own section only.
    pub async fn analyze(&self) -> MetricsRecord {
        let logger = &self.logger;
        let extra = &self.options.extra_ignored;
        logger.info("Analyzing repository...");

        let identity = self.identity();

        logger.step("Analyzing git history...");
        let git = git::read_history(
            &self.root,
            self.options.query_timeout,
            self.options.log_timeout,
            logger,
        )
        .await;

        logger.step("Analyzing code structure...");
        let code = CodeScanner::new(&self.root, extra).scan();

        logger.step("Analyzing tests...");
        let tests = TestDetector::new(&self.root, extra).detect(&code);

        logger.step("Analyzing dependencies...");
        let dependencies = dependencies::read_manifests(&self.root, logger);

        logger.step("Analyzing files...");
        let files = InventoryBuilder::new(&self.root, extra).build();

        logger.step("Analyzing CI/CD...");
        let ci = ci::read_ci_config(&self.root);

        logger.step("Calculating quality metrics...");
        let quality = quality::derive(&git, Utc::now());

        logger.success("Analysis complete");

        MetricsRecord {
            identity,
            git,
            code,
            tests,
            dependencies,
            files,
            ci,
            quality,
        }
    }
}
