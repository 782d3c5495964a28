//! # Error Handling
//!
//! This module defines the centralized error type for `stagit-site`. It uses
//! `thiserror` to build a single `Error` enum covering every failure mode of a
//! site build, each variant carrying enough context (URL, command line,
//! repository name) to tell the user which step stopped the build.
//!
//! Every step of a build is abort-on-first-error, so there is no recovery
//! logic built around these variants: they exist to be propagated with `?`
//! and reported once, at the top of the CLI.
//!
//! The failure families are:
//!
//! - Configuration loading and validation.
//! - The repository listing request (network, HTTP status, payload).
//! - Listing validation (unsafe or duplicate repository names).
//! - Subprocesses (`git`, `make`, the renderer): spawn failures, non-zero
//!   exits and timeouts.
//! - Renderer output and static asset problems.
//! - Plain I/O and the wrapped library errors.

use std::time::Duration;
use thiserror::Error;

/// Main error type for stagit-site operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be parsed or holds invalid values.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The listing request could not be sent or its body could not be read.
    #[error("Network operation error: {url} - {message}")]
    Network { url: String, message: String },

    /// The listing endpoint answered with a non-success status.
    #[error("Repository listing failed for {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// A repository name cannot be used as a directory name.
    #[error("Invalid repository name '{name}': {reason}")]
    InvalidRepositoryName { name: String, reason: String },

    /// Two listed repositories share a name and would collide on disk.
    #[error("Duplicate repository name '{name}' in listing")]
    DuplicateRepository { name: String },

    /// `git clone` failed.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// An external command could not be started at all.
    #[error("Failed to start command `{command}`: {message}")]
    CommandSpawn { command: String, message: String },

    /// An external command exited unsuccessfully.
    #[error("Command `{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// An external command ran past its deadline and was killed.
    #[error("Command `{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The renderer is missing or did not produce what was expected.
    #[error("Renderer error: {message}")]
    Renderer { message: String },

    /// A static asset could not be copied into the publish tree.
    #[error("Static asset error: {path} - {message}")]
    StaticAsset { path: String, message: String },

    /// Writing the sidecar metadata files of a clone failed.
    #[error("Failed to write metadata for repository '{repository}': {message}")]
    Sidecar { repository: String, message: String },

    /// The worker pool could not be created.
    #[error("Worker pool error: {message}")]
    WorkerPool { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON decoding error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// An HTTP client error, wrapped from `reqwest::Error`.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// An error while walking glob matches, wrapped from `glob::GlobError`.
    #[error("Glob traversal error: {0}")]
    GlobWalk(#[from] glob::GlobError),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
