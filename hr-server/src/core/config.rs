use rust_decimal::Decimal;

use crate::salary::SalaryPolicy;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/hr-server | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | MIN_PERCENT_CHANGE | -25 | Lower bound of the salary policy band (%) |
/// | MAX_PERCENT_CHANGE | 50 | Upper bound of the salary policy band (%) |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/hr HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database file and log output
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Lower bound of the allowed salary change band, percent
    pub min_percent_change: Decimal,
    /// Upper bound of the allowed salary change band, percent
    pub max_percent_change: Decimal,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let default_policy = SalaryPolicy::default();
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/hr-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            min_percent_change: std::env::var("MIN_PERCENT_CHANGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_policy.min_percent_change),
            max_percent_change: std::env::var("MAX_PERCENT_CHANGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_policy.max_percent_change),
        }
    }

    /// Override work_dir and port, typically for tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn salary_policy(&self) -> SalaryPolicy {
        SalaryPolicy::new(self.min_percent_change, self.max_percent_change)
    }

    /// Path of the embedded database file under the working directory.
    pub fn db_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("hr.redb")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
