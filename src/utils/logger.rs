//! Console progress logging
//!
//! Every analysis pass reports through a [`Logger`] so output stays uniformly
//! prefixed. A quiet logger drops all output, which keeps stdout clean when
//! the metrics record itself is printed.

use colored::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    quiet: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger that emits nothing
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    /// Top-level progress message
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{} {}", "[*]".cyan().bold(), msg);
        }
    }

    /// Start of an analysis pass
    pub fn step(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {}", "[*]".cyan(), msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {}", "[+]".green().bold(), msg.green());
        }
    }

    /// A degraded sub-step that fell back to its default
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("    {} {}", "[!]".yellow(), msg.yellow());
        }
    }
}
