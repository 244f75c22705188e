//! Suite configuration
//!
//! Layered lowest to highest: defaults, an optional TOML file, then
//! `PETSTORE_*` environment variables. The harness applies its CLI flags on
//! top of the result.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};

pub const ENV_BASE_URL: &str = "PETSTORE_BASE_URL";
pub const ENV_UPDATE_MISSING_STATUS: &str = "PETSTORE_UPDATE_MISSING_STATUS";
pub const ENV_ISOLATED: &str = "PETSTORE_ISOLATED";

/// Suite configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Service root, e.g. `https://petstore.swagger.io/v2`
    pub base_url: String,

    /// Request timeout; `None` keeps the HTTP client's default
    pub timeout_secs: Option<u64>,

    /// The target is private to this run (a fresh mock, a throwaway deployment)
    pub isolated_target: bool,

    /// Status codes the scenarios expect where the service contract is unsettled
    pub expectations: Expectations,

    /// Directory for `test-results.json`
    pub output_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            isolated_target: false,
            expectations: Expectations::default(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Expected status codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expectations {
    /// Status of `PUT /pet` for a pet that was deleted beforehand.
    /// 404 when the service rejects the update, 200 when it upserts.
    pub update_missing_status: u16,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            update_missing_status: 404,
        }
    }
}

impl SuiteConfig {
    /// Configuration aimed at a private target such as a freshly spawned mock
    pub fn isolated(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            isolated_target: true,
            ..Default::default()
        }
    }

    /// Parse from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading suite config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Defaults or the given file, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `PETSTORE_*` overrides from `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_UPDATE_MISSING_STATUS) {
            self.expectations.update_missing_status = raw.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("{}={} is not a status code", ENV_UPDATE_MISSING_STATUS, raw))
            })?;
        }

        if let Some(raw) = lookup(ENV_ISOLATED) {
            self.isolated_target = matches!(raw.trim(), "1" | "true" | "yes");
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject values no run could succeed with
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::InvalidUrl(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }

        let status = self.expectations.update_missing_status;
        if !(100..=599).contains(&status) {
            return Err(Error::InvalidConfig(format!(
                "update_missing_status out of range: {}",
                status
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(Error::InvalidConfig("timeout_secs must be positive".to_string()));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
