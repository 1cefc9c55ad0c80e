//! Configuration handling for the TUI

use crate::state::{DEFAULT_ANALYTICS_DAYS, MAX_ANALYTICS_DAYS};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default onboarding API address
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the API address
pub const API_URL_ENV: &str = "ONBOARDING_API_URL";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_DETAIL_POLL_SECS: u64 = 5;
const DEFAULT_LIST_POLL_SECS: u64 = 10;
const DEFAULT_STATS_POLL_SECS: u64 = 10;
const DEFAULT_ANALYTICS_POLL_SECS: u64 = 10;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Base URL of the onboarding API
    pub api_base_url: Option<String>,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: Option<u64>,
    /// Refresh period of the workflow detail view
    pub detail_poll_secs: Option<u64>,
    /// Refresh period of the workflow list view
    pub list_poll_secs: Option<u64>,
    /// Refresh period of the dashboard stats
    pub stats_poll_secs: Option<u64>,
    /// Refresh period of the analytics view
    pub analytics_poll_secs: Option<u64>,
    /// Reporting window the analytics view opens with, in days
    pub analytics_days: Option<u32>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "onboarding", "onboarding-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file, if the platform has one
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = Some(url);
            }
        }
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// API base URL without a trailing slash
    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    pub fn detail_poll_period(&self) -> Duration {
        poll_period(self.detail_poll_secs, DEFAULT_DETAIL_POLL_SECS)
    }

    pub fn list_poll_period(&self) -> Duration {
        poll_period(self.list_poll_secs, DEFAULT_LIST_POLL_SECS)
    }

    pub fn stats_poll_period(&self) -> Duration {
        poll_period(self.stats_poll_secs, DEFAULT_STATS_POLL_SECS)
    }

    pub fn analytics_poll_period(&self) -> Duration {
        poll_period(self.analytics_poll_secs, DEFAULT_ANALYTICS_POLL_SECS)
    }

    /// Initial analytics window, kept inside what the API accepts
    pub fn analytics_days(&self) -> u32 {
        self.analytics_days
            .unwrap_or(DEFAULT_ANALYTICS_DAYS)
            .clamp(1, MAX_ANALYTICS_DAYS)
    }
}

/// A zero period would spin the poller, so it falls back to the default
fn poll_period(secs: Option<u64>, default: u64) -> Duration {
    match secs {
        Some(s) if s > 0 => Duration::from_secs(s),
        _ => Duration::from_secs(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.request_timeout_ms.is_none());
        assert!(config.detail_poll_secs.is_none());
        assert!(config.list_poll_secs.is_none());
        assert!(config.stats_poll_secs.is_none());
    }

    #[test]
    fn test_default_periods() {
        let config = TuiConfig::default();
        assert_eq!(config.detail_poll_period(), Duration::from_secs(5));
        assert_eq!(config.list_poll_period(), Duration::from_secs(10));
        assert_eq!(config.stats_poll_period(), Duration::from_secs(10));
        assert_eq!(config.analytics_poll_period(), Duration::from_secs(10));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_analytics_days_clamped() {
        assert_eq!(TuiConfig::default().analytics_days(), 30);

        let config = TuiConfig {
            analytics_days: Some(0),
            ..Default::default()
        };
        assert_eq!(config.analytics_days(), 1);

        let config = TuiConfig {
            analytics_days: Some(1000),
            ..Default::default()
        };
        assert_eq!(config.analytics_days(), 365);
    }

    #[test]
    fn test_zero_period_falls_back_to_default() {
        let config = TuiConfig {
            detail_poll_secs: Some(0),
            list_poll_secs: Some(3),
            ..Default::default()
        };
        assert_eq!(config.detail_poll_period(), Duration::from_secs(5));
        assert_eq!(config.list_poll_period(), Duration::from_secs(3));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = TuiConfig {
            api_base_url: Some("http://api.example.com/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_base_url(), "http://api.example.com");
        assert_eq!(TuiConfig::default().api_base_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            api_base_url: Some("http://localhost:9000".to_string()),
            request_timeout_ms: Some(2500),
            detail_poll_secs: Some(2),
            list_poll_secs: Some(20),
            stats_poll_secs: None,
            analytics_poll_secs: Some(60),
            analytics_days: Some(7),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.api_base_url, Some("http://localhost:9000".to_string()));
        assert_eq!(parsed.request_timeout_ms, Some(2500));
        assert_eq!(parsed.detail_poll_secs, Some(2));
        assert_eq!(parsed.list_poll_secs, Some(20));
        assert!(parsed.stats_poll_secs.is_none());
        assert_eq!(parsed.analytics_poll_secs, Some(60));
        assert_eq!(parsed.analytics_days, Some(7));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"list_poll_secs": 30, "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.list_poll_secs, Some(30));
    }

    #[test]
    fn test_config_path_returns_option() {
        // Just test that the function doesn't panic
        let _path = TuiConfig::config_path();
        let _logs = TuiConfig::log_dir();
    }
}
