//! Phase 2: Provision the renderer
//!
//! Fetches the stagit source into a directory owned by the caller and
//! compiles it there. One attempt only; the first failure ends the build.

use crate::error::Result;
use crate::operations::{GitOperations, RendererToolset};
use log::info;
use std::path::Path;

/// Clones `source_url` into `dest`, builds it, and returns the two
/// executables it produced.
pub fn execute(
    git_ops: &dyn GitOperations,
    source_url: &str,
    dest: &Path,
) -> Result<RendererToolset> {
    info!("Provisioning renderer from {}", source_url);
    git_ops.clone_repository(source_url, dest)?;
    git_ops.build(dest)?;
    RendererToolset::locate(dest)
}
