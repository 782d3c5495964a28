//! # External Tool Operations
//!
//! The build drives two external tools: `git` (to fetch repositories and the
//! renderer source) and the stagit renderer. Both sit behind traits so the
//! pipeline can be exercised without network access or a C toolchain:
//!
//! - **`GitOperations`**: cloning a repository and compiling a checkout.
//! - **`RendererOperations`**: rendering one repository's pages and rendering
//!   the index page.
//!
//! `DefaultGitOperations` and `DefaultRendererOperations` run the real
//! commands through [`crate::process`], so every call honours the configured
//! command timeout. Tests replace them with mocks that write fake output.

use crate::defaults::{INDEX_RENDERER, PAGE_RENDERER};
use crate::error::{Error, Result};
use crate::{git, process};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clones `url` into `target_dir`, which must not exist yet.
    fn clone_repository(&self, url: &str, target_dir: &Path) -> Result<()>;

    /// Compiles the checkout at `source_dir`.
    fn build(&self, source_dir: &Path) -> Result<()>;
}

/// Trait for renderer invocations - allows mocking in tests
pub trait RendererOperations: Send + Sync {
    /// Renders the pages of the clone at `repo_dir` into `output_dir`.
    fn render_repository(
        &self,
        toolset: &RendererToolset,
        repo_dir: &Path,
        output_dir: &Path,
    ) -> Result<()>;

    /// Renders the index over `repo_dirs` into the file `output_file`.
    ///
    /// `repo_dirs` must not be empty; `stagit-index` exits with a usage
    /// error when given no repositories.
    fn render_index(
        &self,
        toolset: &RendererToolset,
        repo_dirs: &[PathBuf],
        output_file: &Path,
    ) -> Result<()>;
}

/// Locations of the two renderer executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererToolset {
    /// Per-repository page generator.
    pub page: PathBuf,
    /// Index page generator.
    pub index: PathBuf,
}

impl RendererToolset {
    /// Expected executable paths inside `dir`, without checking them.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            page: dir.join(PAGE_RENDERER),
            index: dir.join(INDEX_RENDERER),
        }
    }

    /// Locates the executables inside `dir`, failing if either is missing.
    pub fn locate(dir: &Path) -> Result<Self> {
        let toolset = Self::in_dir(dir);
        for exe in [&toolset.page, &toolset.index] {
            if !exe.is_file() {
                return Err(Error::Renderer {
                    message: format!("renderer executable not found: {}", exe.display()),
                });
            }
        }
        Ok(toolset)
    }
}

/// The default implementation of `GitOperations`, which shells out to `git`
/// and `make`.
pub struct DefaultGitOperations {
    timeout: Option<Duration>,
}

impl DefaultGitOperations {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl GitOperations for DefaultGitOperations {
    fn clone_repository(&self, url: &str, target_dir: &Path) -> Result<()> {
        git::clone(url, target_dir, self.timeout)
    }

    fn build(&self, source_dir: &Path) -> Result<()> {
        git::make(source_dir, self.timeout)
    }
}

/// The default implementation of `RendererOperations`, which runs the stagit
/// executables.
pub struct DefaultRendererOperations {
    timeout: Option<Duration>,
}

impl DefaultRendererOperations {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl RendererOperations for DefaultRendererOperations {
    fn render_repository(
        &self,
        toolset: &RendererToolset,
        repo_dir: &Path,
        output_dir: &Path,
    ) -> Result<()> {
        let mut cmd = Command::new(&toolset.page);
        // stagit writes into its working directory
        cmd.arg(repo_dir).current_dir(output_dir);
        process::run(cmd, self.timeout)
    }

    fn render_index(
        &self,
        toolset: &RendererToolset,
        repo_dirs: &[PathBuf],
        output_file: &Path,
    ) -> Result<()> {
        let file = File::create(output_file)?;
        let mut cmd = Command::new(&toolset.index);
        cmd.args(repo_dirs);
        process::run_with_stdout(cmd, Stdio::from(file), self.timeout)
    }
}
