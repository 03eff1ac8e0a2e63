//! Launch the platform browser for a served report

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

fn browser_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Open `url` in the default browser without waiting for it to exit
pub fn open_in_browser(url: &str) -> Result<()> {
    browser_command(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open browser for {}", url))?;
    Ok(())
}
