//! Application configuration management.
//!
//! Configuration is stored at `~/.config/ngodesk/config.json` and can be
//! overridden from the environment (`NGODESK_API_URL`, `NGODESK_API_TOKEN`,
//! `NGODESK_PAGE_SIZE`). With no API URL the dashboard runs on demo data.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::listing::{ViewMode, DEFAULT_PAGE_SIZE};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "ngodesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const ENV_API_URL: &str = "NGODESK_API_URL";
pub const ENV_API_TOKEN: &str = "NGODESK_API_TOKEN";
pub const ENV_PAGE_SIZE: &str = "NGODESK_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub organization_name: Option<String>,
    /// Rows per page on screens that don't fix their own size
    pub page_size: usize,
    pub default_view: ViewMode,
    /// Never persisted; only read from the environment
    #[serde(skip)]
    pub api_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            organization_name: None,
            page_size: DEFAULT_PAGE_SIZE,
            default_view: ViewMode::default(),
            api_token: None,
        }
    }
}

impl Config {
    /// Load from the standard location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_with(&Self::config_path()?, |key| std::env::var(key).ok())
    }

    /// Read `path` and overlay `lookup`. Any invalid value is an error; the
    /// caller must not fall back to defaults, which would mean demo mode.
    pub fn load_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        config.apply_env(lookup)?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment values. `lookup` is `std::env::var` in production.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> CoreResult<()> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = non_empty(ENV_API_URL) {
            self.api_base_url = Some(url);
        }
        if let Some(token) = non_empty(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(size) = non_empty(ENV_PAGE_SIZE) {
            self.page_size = size.parse().map_err(|_| CoreError::Config {
                field: ENV_PAGE_SIZE.to_string(),
                reason: format!("'{}' is not a number", size),
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.page_size == 0 {
            return Err(CoreError::Config {
                field: "page_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(ref url) = self.api_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CoreError::Config {
                    field: "api_base_url".to_string(),
                    reason: format!("'{}' is not an http(s) URL", url),
                });
            }
        }
        Ok(())
    }

    /// No backend configured; fixtures stand in for it.
    pub fn is_demo(&self) -> bool {
        self.api_base_url.is_none()
    }

    pub fn organization(&self) -> &str {
        self.organization_name.as_deref().unwrap_or("Demo Organization")
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Demo data and each backend get their own cache directory.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        let base = cache_dir.join(APP_NAME);
        Ok(match self.api_base_url {
            None => base.join("demo"),
            Some(ref url) => base.join(cache_key(url)),
        })
    }
}

/// Filesystem-safe directory name for a backend URL.
fn cache_key(url: &str) -> String {
    url.trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}
