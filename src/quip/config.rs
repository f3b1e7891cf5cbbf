use crate::error::{QuipError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const MAX_SECS: u64 = 86_400;

/// Overrides `remote_url` for a single invocation.
pub const REMOTE_URL_ENV: &str = "QUIP_REMOTE_URL";

/// Keys accepted by [`QuipConfig::get`] and [`QuipConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["remote-url", "sync-interval", "request-timeout", "push-on-add"];

/// Configuration for quip, stored in `config.json` of the active scope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuipConfig {
    /// Endpoint for sync (GET) and push (POST). Sync is off when unset.
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Seconds between background sync cycles in `watch`
    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// POST newly added quotes to the remote
    #[serde(default = "default_push_on_add")]
    pub push_on_add: bool,
}

fn default_sync_interval() -> u64 {
    DEFAULT_SYNC_INTERVAL_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_push_on_add() -> bool {
    true
}

impl Default for QuipConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            push_on_add: true,
        }
    }
}

impl QuipConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QuipError::Io)?;
        let config: QuipConfig =
            serde_json::from_str(&content).map_err(QuipError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QuipError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(QuipError::Serialization)?;
        fs::write(config_path, content).map_err(QuipError::Io)?;
        Ok(())
    }

    /// Applies environment overrides on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(REMOTE_URL_ENV) {
            self.remote_url = normalize_url(&url);
        }
        self
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.clamp(1, MAX_SECS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.clamp(1, MAX_SECS))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "remote-url" => Some(self.remote_url.clone().unwrap_or_else(|| "none".to_string())),
            "sync-interval" => Some(self.sync_interval_secs.to_string()),
            "request-timeout" => Some(self.request_timeout_secs.to_string()),
            "push-on-add" => Some(self.push_on_add.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "remote-url" => {
                let url = normalize_url(value);
                if let Some(url) = &url {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        return Err(format!("remote-url must be an http(s) URL, got {}", url));
                    }
                }
                self.remote_url = url;
            }
            "sync-interval" => self.sync_interval_secs = parse_seconds(key, value)?,
            "request-timeout" => self.request_timeout_secs = parse_seconds(key, value)?,
            "push-on-add" => self.push_on_add = parse_bool(value)?,
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

fn normalize_url(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_seconds(key: &str, value: &str) -> std::result::Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(secs) if (1..=MAX_SECS).contains(&secs) => Ok(secs),
        _ => Err(format!("{} must be between 1 and {} seconds", key, MAX_SECS)),
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("expected true or false, got {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = QuipConfig::default();
        assert_eq!(config.remote_url, None);
        assert_eq!(config.sync_interval(), Duration::from_secs(30));
        assert!(config.push_on_add);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = QuipConfig::load(temp.path()).unwrap();
        assert_eq!(config, QuipConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("scope");

        let mut config = QuipConfig::default();
        config.set("remote-url", "http://localhost:3000/quotes").unwrap();
        config.set("sync-interval", "5").unwrap();
        config.save(&dir).unwrap();

        let loaded = QuipConfig::load(&dir).unwrap();
        assert_eq!(loaded.remote_url.as_deref(), Some("http://localhost:3000/quotes"));
        assert_eq!(loaded.sync_interval_secs, 5);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"push_on_add": false}"#).unwrap();
        let config = QuipConfig::load(temp.path()).unwrap();
        assert!(!config.push_on_add);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = QuipConfig::default();
        assert!(config.set("remote-url", "ftp://example.com").is_err());
        assert!(config.set("sync-interval", "0").is_err());
        assert!(config.set("sync-interval", "soon").is_err());
        assert!(config.set("push-on-add", "maybe").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, QuipConfig::default());
    }

    #[test]
    fn test_seconds_are_capped_at_one_day() {
        let mut config = QuipConfig::default();
        config.set("sync-interval", "86400").unwrap();
        assert!(config.set("sync-interval", "86401").is_err());
        assert!(config
            .set("request-timeout", "18446744073709551615")
            .is_err());
        assert_eq!(config.sync_interval_secs, 86_400);

        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{"sync_interval_secs": 18446744073709551615, "request_timeout_secs": 0}"#,
        )
        .unwrap();
        let loaded = QuipConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.sync_interval(), Duration::from_secs(86_400));
        assert_eq!(loaded.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_remote_url_can_be_cleared() {
        let mut config = QuipConfig::default();
        config.set("remote-url", "https://example.com/q").unwrap();
        config.set("remote-url", "none").unwrap();
        assert_eq!(config.remote_url, None);
        assert_eq!(config.get("remote-url").as_deref(), Some("none"));
    }

    #[test]
    fn test_entries_cover_all_keys() {
        let entries = QuipConfig::default().entries();
        let keys: Vec<_> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, CONFIG_KEYS);
    }
}
