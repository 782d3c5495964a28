//! Orchestrator for a complete site build
//!
//! `SiteBuilder` owns the configuration and the three operation seams, and
//! runs the phases in order:
//!
//! 1. Reset the publish directory
//! 2. Provision the renderer in a temporary directory
//! 3. List and validate repositories
//! 4. + 5. In a second temporary directory, materialize and render each repository
//! 6. Render the index over all clones
//!
//! Both temporary directories are `TempDir` guards scoped to `build`, so they
//! are removed whether the build finishes or an error propagates out of it.
//! Output already written to the publish directory is left as-is on failure.

use super::pages::PageJob;
use super::{phase1, phase2, phase3, phase4, phase5, phase6};
use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::listing::{GitHubLister, RepositoryDescriptor, RepositoryLister};
use crate::operations::{
    DefaultGitOperations, DefaultRendererOperations, GitOperations, RendererOperations,
    RendererToolset,
};
use log::info;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// What a successful build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Root of the publish tree.
    pub publish_dir: PathBuf,
    /// Repository names in listing order.
    pub repositories: Vec<String>,
}

/// Runs site builds for one configuration.
pub struct SiteBuilder {
    config: SiteConfig,
    lister: Box<dyn RepositoryLister>,
    git_ops: Box<dyn GitOperations>,
    renderer_ops: Box<dyn RendererOperations>,
}

impl SiteBuilder {
    /// Creates a builder backed by the GitHub API, `git` and stagit.
    pub fn new(config: SiteConfig, token: Option<String>) -> Result<Self> {
        config.validate()?;
        let lister = GitHubLister::new(&config, token)?;
        let timeout = config.command_timeout();
        Ok(Self::with_operations(
            config,
            Box::new(lister),
            Box::new(DefaultGitOperations::new(timeout)),
            Box::new(DefaultRendererOperations::new(timeout)),
        ))
    }

    /// Creates a builder with custom listing, git and renderer operations.
    pub fn with_operations(
        config: SiteConfig,
        lister: Box<dyn RepositoryLister>,
        git_ops: Box<dyn GitOperations>,
        renderer_ops: Box<dyn RendererOperations>,
    ) -> Self {
        Self {
            config,
            lister,
            git_ops,
            renderer_ops,
        }
    }

    /// Runs every phase of the build.
    pub fn build(&self) -> Result<BuildSummary> {
        let config = &self.config;

        // Phase 1: Reset
        phase1::execute(&config.publish_dir)?;

        // Phase 2: Provision (the guard must outlive every render call)
        let (_renderer_guard, toolset) = self.provision()?;

        // Phase 3: Listing
        let repositories = phase3::execute(self.lister.as_ref(), &config.account)?;

        // Phases 4 + 5: Materialize and render each repository
        let staging = tempfile::Builder::new()
            .prefix("stagit-site-repos-")
            .tempdir()?;
        self.render_repositories(&repositories, staging.path(), &toolset)?;

        // Phase 6: Index
        phase6::execute(
            self.renderer_ops.as_ref(),
            &toolset,
            staging.path(),
            &config.publish_dir,
            &config.static_dir,
        )?;

        info!(
            "Published {} repositories to {}",
            repositories.len(),
            config.publish_dir.display()
        );
        Ok(BuildSummary {
            publish_dir: config.publish_dir.clone(),
            repositories: repositories.into_iter().map(|r| r.name).collect(),
        })
    }

    /// Returns the renderer to use, plus the temporary directory holding it
    /// when it had to be built.
    fn provision(&self) -> Result<(Option<TempDir>, RendererToolset)> {
        if let Some(dir) = &self.config.renderer_dir {
            info!("Using prebuilt renderer in {}", dir.display());
            let toolset = RendererToolset::locate(&std::path::absolute(dir)?)?;
            return Ok((None, toolset));
        }

        let dir = tempfile::Builder::new()
            .prefix("stagit-site-renderer-")
            .tempdir()?;
        let toolset = phase2::execute(
            self.git_ops.as_ref(),
            &self.config.renderer_source,
            &dir.path().join("stagit"),
        )?;
        Ok((Some(dir), toolset))
    }

    fn render_repositories(
        &self,
        repositories: &[RepositoryDescriptor],
        staging_root: &Path,
        toolset: &RendererToolset,
    ) -> Result<()> {
        let jobs = self.config.jobs;
        if jobs <= 1 {
            return repositories
                .iter()
                .try_for_each(|repo| self.render_repository(repo, staging_root, toolset));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| Error::WorkerPool {
                message: e.to_string(),
            })?;
        pool.install(|| {
            repositories
                .par_iter()
                .try_for_each(|repo| self.render_repository(repo, staging_root, toolset))
        })
    }

    /// Clone, sidecars, render: always in this order for one repository.
    fn render_repository(
        &self,
        repo: &RepositoryDescriptor,
        staging_root: &Path,
        toolset: &RendererToolset,
    ) -> Result<()> {
        phase4::execute(self.git_ops.as_ref(), repo, staging_root, &self.config.owner)?;
        phase5::execute(
            self.renderer_ops.as_ref(),
            toolset,
            &PageJob {
                name: &repo.name,
                staging_root,
                publish_root: &self.config.publish_dir,
                static_dir: &self.config.static_dir,
            },
        )?;
        Ok(())
    }
}
