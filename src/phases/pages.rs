//! Phase 5: Render one repository's pages
//!
//! Creates `<publish_root>/<name>`, runs the page renderer there against the
//! staged clone, makes the commit log the landing page, and copies the static
//! assets next to the generated HTML.

use super::copy_static_assets;
use crate::error::{Error, Result};
use crate::operations::{RendererOperations, RendererToolset};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Page the renderer is expected to emit; it doubles as `index.html`.
const LOG_PAGE: &str = "log.html";
const LANDING_PAGE: &str = "index.html";

/// Paths a single page-generation step works with.
pub struct PageJob<'a> {
    pub name: &'a str,
    pub staging_root: &'a Path,
    pub publish_root: &'a Path,
    pub static_dir: &'a Path,
}

/// Renders `job.name` and returns its publish subdirectory.
///
/// Fails if the subdirectory already exists; callers guarantee unique names.
pub fn execute(
    renderer_ops: &dyn RendererOperations,
    toolset: &RendererToolset,
    job: &PageJob<'_>,
) -> Result<PathBuf> {
    let output_dir = job.publish_root.join(job.name);
    fs::create_dir(&output_dir)?;

    // The renderer runs with a different working directory, so hand it an
    // absolute path to the clone.
    let repo_dir = std::path::absolute(job.staging_root.join(job.name))?;

    info!("Rendering {}", job.name);
    renderer_ops.render_repository(toolset, &repo_dir, &output_dir)?;

    let log_page = output_dir.join(LOG_PAGE);
    if !log_page.is_file() {
        return Err(Error::Renderer {
            message: format!("{} did not produce {}", job.name, LOG_PAGE),
        });
    }
    fs::copy(&log_page, output_dir.join(LANDING_PAGE))?;

    copy_static_assets(job.static_dir, &output_dir)?;
    Ok(output_dir)
}
