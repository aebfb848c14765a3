use std::path::PathBuf;

/// Application configuration
///
/// # Environment variables
///
/// All settings can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory holding the catalog database |
/// | LOG_LEVEL | info | Tracing filter level |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/showroom LOG_LEVEL=debug cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the embedded database
    pub work_dir: String,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override the working directory — used by tests
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// Path of the embedded catalog database
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("catalog.db")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
