//! Static monitor settings loaded from TOML.
//!
//! Every key is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! threshold = 2.0          # RM per gram
//! interval_secs = 300
//! state_file = "~/.gold_price_history.json"
//! ```
use gold_common::api::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use gold_common::{MonitorError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "gold_monitor.toml";

const DEFAULT_STATE_FILE: &str = "~/.gold_price_history.json";

/// Monitor settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Minimum absolute change in RM per gram that raises an alert.
    pub threshold: f64,
    /// Pause between checks.
    pub interval_secs: u64,
    /// Rates endpoint.
    pub api_url: String,
    /// Where the last reading is stored. A leading `~/` expands to `$HOME`.
    pub state_file: PathBuf,
    /// HTTP timeout for one fetch.
    pub request_timeout_secs: u64,
    /// Title of the desktop notification.
    pub notification_title: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold: 2.0,
            interval_secs: 300,
            api_url: DEFAULT_API_URL.to_string(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            notification_title: "💰 Gold Price Alert".to_string(),
        }
    }
}

impl MonitorConfig {
    /// Parse and validate a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&s)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve the config to use: an explicit path must exist, the implicit one is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }
        if self.interval_secs == 0 {
            return Err(MonitorError::InvalidConfig("interval_secs must be > 0".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(MonitorError::InvalidConfig("request_timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    /// Pause between checks.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// HTTP timeout for one fetch.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// State file path with `~/` expanded.
    pub fn state_path(&self) -> PathBuf {
        expand_home(&self.state_file, std::env::var_os("HOME").map(PathBuf::from))
    }
}

fn expand_home(path: &Path, home: Option<PathBuf>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.threshold, 2.0);
        assert_eq!(cfg.interval(), Duration::from_secs(300));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg = MonitorConfig::from_toml("threshold = 1.5\ninterval_secs = 60\n").unwrap();
        assert_eq!(cfg.threshold, 1.5);
        assert_eq!(cfg.interval_secs, 60);
        assert_eq!(cfg.notification_title, MonitorConfig::default().notification_title);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(MonitorConfig::from_toml("").unwrap(), MonitorConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        for s in ["threshold = -1.0", "interval_secs = 0", "request_timeout_secs = 0"] {
            assert!(matches!(
                MonitorConfig::from_toml(s),
                Err(MonitorError::InvalidConfig(_))
            ));
        }
        assert!(matches!(
            MonitorConfig::from_toml("thresold = 1.0"),
            Err(MonitorError::Config(_))
        ));
        assert!(matches!(
            MonitorConfig::from_toml("threshold = \"two\""),
            Err(MonitorError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("gold_monitor_no_such_config.toml");
        assert!(matches!(
            MonitorConfig::load(Some(&path)),
            Err(MonitorError::Io(_))
        ));
    }

    #[test]
    fn test_expand_home() {
        let home = Some(PathBuf::from("/home/ana"));
        assert_eq!(
            expand_home(Path::new("~/.gold_price_history.json"), home.clone()),
            PathBuf::from("/home/ana/.gold_price_history.json")
        );
        assert_eq!(
            expand_home(Path::new("/var/lib/gold.json"), home),
            PathBuf::from("/var/lib/gold.json")
        );
        assert_eq!(expand_home(Path::new("~/x.json"), None), PathBuf::from("~/x.json"));
    }
}
