//! Static dashboard rendering
//!
//! The dashboard is a single HTML page rendered from an embedded template,
//! written next to a JSON snapshot of the same metrics record.

pub mod server;
pub mod view;

pub use server::StaticServer;
pub use view::DashboardView;

use crate::analysis::MetricsRecord;
use crate::constants;
use crate::utils::ensure_directory_exists;
use anyhow::{Context, Result};
use minijinja::Environment;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const DASHBOARD_TEMPLATE: &str = "dashboard.html";

fn get_template_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| {
        let mut env = Environment::new();

        // The .html name turns on HTML auto-escaping
        env.add_template(DASHBOARD_TEMPLATE, include_str!("templates/dashboard.html"))
            .expect("Failed to add dashboard template");

        env
    })
}

/// Render the dashboard page for a record
pub fn render_html(record: &MetricsRecord) -> Result<String> {
    let tmpl = get_template_env().get_template(DASHBOARD_TEMPLATE)?;
    let view = DashboardView::new(record);

    tmpl.render(&view)
        .context("Failed to render dashboard template")
}

/// Pretty-printed JSON snapshot of a record
pub fn render_snapshot(record: &MetricsRecord) -> Result<String> {
    serde_json::to_string_pretty(record).context("Failed to serialize metrics record")
}

/// Files produced by [`write_report`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub index: PathBuf,
    pub data: PathBuf,
}

/// Write `index.html` and `data.json` into `out_dir`, creating it if needed
pub fn write_report(record: &MetricsRecord, out_dir: &Path) -> Result<ReportPaths> {
    ensure_directory_exists(out_dir)?;

    let paths = ReportPaths {
        index: out_dir.join(constants::report::INDEX_FILE),
        data: out_dir.join(constants::report::DATA_FILE),
    };

    fs::write(&paths.index, render_html(record)?)
        .with_context(|| format!("Failed to write {}", paths.index.display()))?;
    fs::write(&paths.data, render_snapshot(record)?)
        .with_context(|| format!("Failed to write {}", paths.data.display()))?;

    Ok(paths)
}
