//! Central constants for the repodash application

/// Default values for git history collection
pub mod git {
    /// Name of the version-control metadata directory at the repository root
    pub const METADATA_DIR: &str = ".git";

    /// Branch name reported when the current branch cannot be determined
    pub const UNKNOWN_BRANCH: &str = "unknown";

    /// Timeout in seconds for the short queries (count, branches, contributors)
    pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;

    /// Timeout in seconds for the commit log query
    pub const DEFAULT_LOG_TIMEOUT_SECS: u64 = 10;

    /// Maximum number of commit entries retained from the log
    pub const MAX_COMMIT_HISTORY: usize = 100;

    /// Field delimiter used in the commit log pretty format
    pub const LOG_FIELD_DELIMITER: char = '|';

    /// Length of the abbreviated commit hash
    pub const SHORT_HASH_LEN: usize = 7;
}

/// Caps applied to ranked lists in the metrics record
pub mod limits {
    /// Top main source files by line count
    pub const MAX_MAIN_FILES: usize = 20;

    /// Top test files by detected test count
    pub const MAX_TEST_FILES: usize = 15;

    /// Largest files by size
    pub const MAX_LARGEST_FILES: usize = 15;

    /// Bytes inspected when deciding whether a file is binary
    pub const BINARY_SNIFF_LEN: usize = 8192;
}

/// Quality metric constants
pub mod quality {
    /// Fixed organizational score reported for every repository
    pub const CODE_ORGANIZATION_SCORE: u32 = 75;

    /// Commit subject keywords counted as refactoring work
    pub const REFACTOR_KEYWORDS: &[&str] =
        &["refactor", "cleanup", "reorganize", "update", "move", "rename"];
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "repodash.yaml";

    /// Default output directory for the generated report
    pub const DEFAULT_OUTPUT_DIR: &str = "dashboard_site";

    /// Default port for the local report server
    pub const DEFAULT_PORT: u16 = 4173;

    /// Default bind address for the local report server
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Upper bound accepted for any configured git timeout
    pub const MAX_TIMEOUT_SECS: u64 = 60;
}

/// Report artifact names
pub mod report {
    /// Rendered dashboard document
    pub const INDEX_FILE: &str = "index.html";

    /// Serialized metrics snapshot
    pub const DATA_FILE: &str = "data.json";

    /// Number of retained commits plotted on the timeline
    pub const TIMELINE_COMMITS: usize = 30;
}
