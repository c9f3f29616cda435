use crate::error::{Result, ThoughtzError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_COLLECTION: &str = "thoughts";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Connection settings for the remote document collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Base URL of the document service, e.g. `https://api.example.com`.
    pub base_url: String,

    /// Collection name under the service.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Optional bearer token sent with every request.
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

/// Gateway configuration, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Where the on-device slots live. Defaults to the OS data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Remote store settings. Absent means local-only operation.
    #[serde(default)]
    pub remote: Option<RemoteConfig>,

    /// Poll interval for remote watch subscriptions, in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            remote: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl GatewayConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ThoughtzError::Io)?;
        let config: GatewayConfig =
            serde_json::from_str(&content).map_err(ThoughtzError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ThoughtzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ThoughtzError::Serialization)?;
        fs::write(config_path, content).map_err(ThoughtzError::Io)?;
        Ok(())
    }

    /// The slot directory: the configured override, or the OS data dir.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let dirs = ProjectDirs::from("com", "thoughtz", "thoughtz")
            .ok_or_else(|| ThoughtzError::Store("could not resolve a data directory".to_string()))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert!(config.remote.is_none());
        assert_eq!(config.poll_interval(), Duration::from_secs(15));
    }

    #[test]
    fn test_load_missing_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = GatewayConfig::load(dir.path()).unwrap();
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let config = GatewayConfig {
            data_dir: Some(PathBuf::from("/tmp/thoughtz-test")),
            remote: Some(RemoteConfig {
                base_url: "https://api.example.com".to_string(),
                collection: "thoughts".to_string(),
                api_token: None,
            }),
            poll_interval_secs: 5,
        };
        config.save(dir.path()).unwrap();

        let loaded = GatewayConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_remote_config_defaults() {
        let json = r#"{ "base_url": "https://api.example.com" }"#;
        let remote: RemoteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(remote.collection, "thoughts");
        assert!(remote.api_token.is_none());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = GatewayConfig {
            data_dir: Some(PathBuf::from("/custom/dir")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/custom/dir"));
    }
}
