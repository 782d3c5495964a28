//! Default values for stagit-site configuration.
//!
//! This module provides centralized default values used by `SiteConfig` and
//! the CLI, so the documented defaults live in exactly one place.

use std::path::PathBuf;

/// Configuration file looked up in the working directory when `--config` is
/// not given.
pub const CONFIG_FILE_NAME: &str = "stagit-site.yaml";

/// Static assets copied into every publish directory.
pub const STATIC_ASSETS: [&str; 3] = ["favicon.png", "logo.png", "style.css"];

/// Per-repository renderer executable, relative to the renderer directory.
pub const PAGE_RENDERER: &str = "stagit";

/// Index renderer executable, relative to the renderer directory.
pub const INDEX_RENDERER: &str = "stagit-index";

/// Account whose repositories are mirrored.
pub fn default_account() -> String {
    "srstevenson".to_string()
}

/// Value written to each clone's `owner` file.
pub fn default_owner() -> String {
    "Scott Stevenson".to_string()
}

/// Base URL of the repository listing API.
pub fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Page size requested from the listing API (its maximum).
pub fn default_per_page() -> u32 {
    100
}

/// Where the renderer source is cloned from.
pub fn default_renderer_source() -> String {
    "https://github.com/srstevenson/stagit.git".to_string()
}

/// Directory holding `favicon.png`, `logo.png` and `style.css`.
pub fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

/// Output directory, wiped and regenerated on every build.
pub fn default_publish_dir() -> PathBuf {
    PathBuf::from("public")
}

/// Deadline for each external command, in seconds.
pub fn default_command_timeout_secs() -> Option<u64> {
    Some(600)
}

/// Deadline for each listing request, in seconds.
pub fn default_http_timeout_secs() -> u64 {
    30
}

/// Number of repositories processed concurrently.
pub fn default_jobs() -> usize {
    1
}
