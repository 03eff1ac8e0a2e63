//! Command implementations for the repodash CLI

pub mod analyze;
pub mod base;
pub mod generate;
pub mod serve;

pub use analyze::AnalyzeCommand;
pub use base::{Command, CommandContext};
pub use generate::GenerateCommand;
pub use serve::ServeCommand;
