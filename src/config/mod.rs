//! Environment-driven client configuration.

use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings read by [`TasklineClient::from_env`](crate::client::TasklineClient::from_env).
///
/// * `TASKLINE_BASE_URL` - API origin, default `http://localhost:3001`
/// * `TASKLINE_TIMEOUT_SECS` - request timeout, default 10
/// * `TASKLINE_CREDENTIALS_PATH` - when set, sessions persist to this file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasklineConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub credentials_path: Option<PathBuf>,
}

impl Default for TasklineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            credentials_path: None,
        }
    }
}

impl TasklineConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        Self {
            base_url: std::env::var("TASKLINE_BASE_URL")
                .ok()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: std::env::var("TASKLINE_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| parse_timeout(&raw))
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            credentials_path: std::env::var("TASKLINE_CREDENTIALS_PATH")
                .ok()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }
}

fn parse_timeout(raw: &str) -> Option<u64> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(secs),
        _ => {
            warn!(value = raw, "ignoring invalid TASKLINE_TIMEOUT_SECS");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        let config = TasklineConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.credentials_path, None);
    }

    #[test]
    fn parse_timeout_accepts_positive_seconds() {
        assert_eq!(parse_timeout("30"), Some(30));
        assert_eq!(parse_timeout("1"), Some(1));
    }

    #[test]
    fn parse_timeout_rejects_zero_and_garbage() {
        assert_eq!(parse_timeout("0"), None);
        assert_eq!(parse_timeout("-5"), None);
        assert_eq!(parse_timeout("ten"), None);
        assert_eq!(parse_timeout(""), None);
    }
}
