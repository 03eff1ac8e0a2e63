//! Utility modules for common functionality

pub mod browser;
pub mod filesystem;
pub mod logger;

// Re-export commonly used functions
pub use browser::open_in_browser;
pub use filesystem::ensure_directory_exists;
pub use logger::Logger;
