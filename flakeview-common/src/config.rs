use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CommonResult;
use crate::types::CHART_DATA_LIMIT;

/// Prefix for environment overrides, e.g. `FLAKEVIEW_API__BASE_URL`
pub const ENV_PREFIX: &str = "FLAKEVIEW";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlakeviewConfig {
    pub api: ApiConfig,
    pub dashboard: DashboardConfig,
}

/// CI API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the CI server, the `/api/0/` prefix is appended
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Dashboard rendering and hosting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Server bind address
    pub bind: String,
    /// Path prefix the view is mounted under, used by chart links
    pub base_path: String,
    /// Maximum number of points per chart
    pub chart_limit: usize,
}

impl Default for FlakeviewConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
            user_agent: format!("flakeview/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            base_path: String::new(),
            chart_limit: CHART_DATA_LIMIT,
        }
    }
}

impl FlakeviewConfig {
    /// Load defaults, then `path` (if given), then `FLAKEVIEW_*` environment overrides
    pub fn load(path: Option<&Path>) -> CommonResult<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn to_toml(&self) -> CommonResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> CommonResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// `~/.config/flakeview/config.toml` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flakeview").join("config.toml"))
    }
}
