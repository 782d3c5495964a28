//! # Site Configuration
//!
//! This module defines `SiteConfig`, the explicit configuration passed into a
//! build. Every value has a documented default (see [`crate::defaults`]), so an
//! absent configuration file is valid and describes the stock site.
//!
//! ## File format
//!
//! The optional `stagit-site.yaml` file is a flat YAML mapping. Unknown keys
//! are rejected so that typos surface instead of silently falling back to a
//! default:
//!
//! ```yaml
//! account: srstevenson
//! owner: Scott Stevenson
//! static_dir: static
//! publish_dir: public
//! command_timeout_secs: 600   # null disables the deadline
//! jobs: 4
//! ```

use crate::defaults;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for one site build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Account whose repositories are listed and mirrored.
    pub account: String,
    /// Written verbatim to each clone's `.git/owner`.
    pub owner: String,
    /// Base URL of the listing API.
    pub api_url: String,
    /// Page size for listing requests.
    pub per_page: u32,
    /// Git URL the renderer is cloned from when it has to be provisioned.
    pub renderer_source: String,
    /// Directory with prebuilt `stagit` and `stagit-index` binaries. When set,
    /// provisioning is skipped.
    pub renderer_dir: Option<PathBuf>,
    /// Source directory of the static assets.
    pub static_dir: PathBuf,
    /// Publish tree root.
    pub publish_dir: PathBuf,
    /// Deadline for every external command; `None` waits forever.
    pub command_timeout_secs: Option<u64>,
    /// Deadline for every listing request.
    pub http_timeout_secs: u64,
    /// Repositories processed concurrently.
    pub jobs: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            account: defaults::default_account(),
            owner: defaults::default_owner(),
            api_url: defaults::default_api_url(),
            per_page: defaults::default_per_page(),
            renderer_source: defaults::default_renderer_source(),
            renderer_dir: None,
            static_dir: defaults::default_static_dir(),
            publish_dir: defaults::default_publish_dir(),
            command_timeout_secs: defaults::default_command_timeout_secs(),
            http_timeout_secs: defaults::default_http_timeout_secs(),
            jobs: defaults::default_jobs(),
        }
    }
}

impl SiteConfig {
    /// External command deadline as a `Duration`.
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }

    /// Listing request deadline as a `Duration`.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Checks values that deserialize fine but cannot drive a build.
    pub fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(Error::Config {
                message: "account must not be empty".to_string(),
                hint: Some("Set 'account:' to the user whose repositories are mirrored".to_string()),
            });
        }
        if self.owner.trim().is_empty() {
            return Err(Error::Config {
                message: "owner must not be empty".to_string(),
                hint: None,
            });
        }
        if self.jobs == 0 {
            return Err(Error::Config {
                message: "jobs must be at least 1".to_string(),
                hint: Some("Use 'jobs: 1' for a sequential build".to_string()),
            });
        }
        if !(1..=100).contains(&self.per_page) {
            return Err(Error::Config {
                message: format!("per_page must be between 1 and 100, got {}", self.per_page),
                hint: None,
            });
        }
        if self.command_timeout_secs == Some(0) {
            return Err(Error::Config {
                message: "command_timeout_secs must be positive".to_string(),
                hint: Some("Use 'command_timeout_secs: null' to disable the deadline".to_string()),
            });
        }
        Ok(())
    }
}

/// Parses a YAML string into a validated `SiteConfig`.
pub fn parse(yaml_content: &str) -> Result<SiteConfig> {
    // An empty or comment-only file deserializes to unit, not a mapping.
    if yaml_content
        .lines()
        .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#'))
    {
        return Ok(SiteConfig::default());
    }

    let config: SiteConfig = serde_yaml::from_str(yaml_content).map_err(|e| Error::Config {
        message: e.to_string(),
        hint: None,
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads and validates the configuration file at `path`.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
