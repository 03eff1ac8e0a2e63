//! Read-only git queries using system git commands
//!
//! ## Sub-modules
//!
//! - [`process`]: Timeout-bounded execution of a single git invocation
//! - [`history`]: The five history queries and their assembly into a
//!   [`VcsSummary`](crate::analysis::VcsSummary)
//!
//! No function here mutates repository state.

pub mod history;
pub mod process;

pub use history::{GitCli, HistoryQueries, collect_summary, read_history};
pub use process::run_git;
