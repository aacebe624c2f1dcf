use std::env;
use std::path::PathBuf;

/// Log file used when nothing else is configured.
pub const DEFAULT_LOG_FILE: &str = "transaksi.csv";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV: &str = "LAUNDRY_LOG_FILE";

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where completed checkouts are appended.
    pub log_path: PathBuf,
}

impl Config {
    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::resolve(env::args().skip(1), env::var(LOG_FILE_ENV).ok())
    }

    /// First argument wins, then the environment value, then [`DEFAULT_LOG_FILE`].
    pub fn resolve(args: impl IntoIterator<Item = String>, env_value: Option<String>) -> Self {
        let log_path = args
            .into_iter()
            .next()
            .or(env_value)
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        Self {
            log_path: PathBuf::from(log_path),
        }
    }

    pub fn log_path_is_csv(&self) -> bool {
        self.log_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}
