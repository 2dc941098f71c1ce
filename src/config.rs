use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    #[serde(default)]
    pub vim_mode: bool,
    /// Refetch interval for contact lists
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// A contact counts as online when active within this window
    #[serde(default = "default_online_timeout_secs")]
    pub online_timeout_secs: u64,
    #[serde(default = "default_thumbnail_max_fetch_size")]
    pub thumbnail_max_fetch_size: u64,
    #[serde(default = "default_true")]
    pub image_preview_enabled: bool,
    #[serde(default = "default_image_protocol")]
    pub image_protocol: String,
    /// Extra rows rendered beyond the viewport edges
    #[serde(default = "default_overscan")]
    pub overscan: usize,
    #[serde(default = "default_error_toast_ms")]
    pub error_toast_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    5000
}

fn default_online_timeout_secs() -> u64 {
    300
}

fn default_thumbnail_max_fetch_size() -> u64 {
    1024 * 1024
}

fn default_true() -> bool {
    true
}

fn default_image_protocol() -> String {
    "auto".to_string()
}

fn default_overscan() -> usize {
    5
}

fn default_error_toast_ms() -> u64 {
    5000
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// Determine the config file path with fallback logic
pub fn get_config_path(cli_path: Option<String>) -> Result<PathBuf> {
    // If CLI argument provided, use it
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(p);
        } else {
            anyhow::bail!("Config file not found at specified path: {}", path);
        }
    }

    // Try ~/.config/drivetui/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("drivetui").join("config.yaml");

        if config_path.exists() {
            return Ok(config_path);
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }

    let expected_path = if let Some(config_dir) = dirs::config_dir() {
        config_dir
            .join("drivetui")
            .join("config.yaml")
            .display()
            .to_string()
    } else {
        "~/.config/drivetui/config.yaml".to_string()
    };

    anyhow::bail!(
        "Config file not found. Expected locations:\n\
         1. {} (preferred)\n\
         2. ./config.yaml (fallback)\n\
         \n\
         Use --config <path> to specify a custom location.",
        expected_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_yaml("api_key: abc\nbase_url: http://localhost:1227\n").unwrap();
        assert_eq!(config.api_key, "abc");
        assert!(!config.vim_mode);
        assert_eq!(config.poll_interval_ms, 5000);
        assert_eq!(config.online_timeout_secs, 300);
        assert_eq!(config.overscan, 5);
        assert_eq!(config.error_toast_ms, 5000);
        assert!(config.image_preview_enabled);
    }

    #[test]
    fn test_config_overrides() {
        let yaml = "api_key: abc\nbase_url: http://x\nvim_mode: true\npoll_interval_ms: 1000\noverscan: 2\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.vim_mode);
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.overscan, 2);
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        assert!(Config::from_yaml("base_url: http://x\n").is_err());
    }

    #[test]
    fn test_explicit_missing_path_errors() {
        let err = get_config_path(Some("/definitely/not/here.yaml".to_string())).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
