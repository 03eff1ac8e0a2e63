//! Analyze command implementation

use super::{Command, CommandContext};
use crate::analysis::MetricsRecord;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Analyze a repository and print its metrics
pub struct AnalyzeCommand {
    /// Print the full metrics record as JSON
    pub json: bool,
}

fn print_row(label: &str, value: impl std::fmt::Display) {
    println!("  {:<22} {}", label.bold(), value);
}

fn print_summary(record: &MetricsRecord) {
    println!();
    println!("{}", record.identity.repo_name.cyan().bold());
    println!("{}", record.identity.repo_path.dimmed());
    println!();

    print_row("Branch", &record.git.current_branch);
    print_row("Commits", record.git.total_commits);
    print_row("Contributors", record.git.contributors.len());
    print_row("Lines of code", record.code.total_lines);
    print_row("Files", record.files.total_files);
    print_row("Tests", record.tests.total_tests);
    print_row("Coverage (proxy)", format!("{}%", record.tests.test_coverage));

    if !record.tests.test_frameworks.is_empty() {
        let frameworks: Vec<_> = record.tests.test_frameworks.iter().cloned().collect();
        print_row("Test frameworks", frameworks.join(", "));
    }
    if !record.dependencies.package_managers.is_empty() {
        print_row(
            "Dependencies",
            format!(
                "{} ({})",
                record.dependencies.total_deps,
                record.dependencies.package_managers.join(", ")
            ),
        );
    }
    if !record.ci.platforms.is_empty() {
        print_row("CI", record.ci.platforms.join(", "));
    }

    print_row("Project age", format!("{} days", record.quality.project_age_days));
    print_row("Commits per day", record.quality.commits_per_day);
    print_row("Refactoring", format!("{}%", record.quality.refactoring_ratio));

    let top: Vec<String> = record
        .code
        .extensions_by_lines()
        .into_iter()
        .take(5)
        .map(|(ext, stats)| format!("{} {}", ext, stats.line_count))
        .collect();
    if !top.is_empty() {
        print_row("Top extensions", top.join(", "));
    }
}

#[async_trait]
impl Command for AnalyzeCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        // JSON mode keeps stdout reserved for the record
        let record = context.analyze(self.json).await?;

        if self.json {
            println!("{}", crate::report::render_snapshot(&record)?);
        } else {
            print_summary(&record);
        }

        Ok(())
    }
}
