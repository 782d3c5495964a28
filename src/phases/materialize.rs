//! Phase 4: Materialize a repository in the staging workspace
//!
//! Clones the repository and writes the three sidecar files stagit reads from
//! the clone's `.git` directory:
//!
//! - `description` - the listed description (empty when absent)
//! - `owner` - the configured owner name
//! - `url` - the clone URL
//!
//! The sidecars are written as one unit. Each is first staged as a temporary
//! file inside `.git` and only renamed into place once all three exist; if
//! anything fails the whole clone is removed so no repository is ever left
//! with partial metadata.

use crate::error::{Error, Result};
use crate::listing::RepositoryDescriptor;
use crate::operations::GitOperations;
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Clones `repo` into `<staging_root>/<name>` and writes its sidecars.
///
/// Returns the path of the clone.
pub fn execute(
    git_ops: &dyn GitOperations,
    repo: &RepositoryDescriptor,
    staging_root: &Path,
    owner: &str,
) -> Result<PathBuf> {
    let clone_dir = staging_root.join(&repo.name);
    info!("Cloning {} from {}", repo.name, repo.clone_url);
    git_ops.clone_repository(&repo.clone_url, &clone_dir)?;

    let sidecars = [
        ("description", repo.description_text()),
        ("owner", owner),
        ("url", repo.clone_url.as_str()),
    ];

    if let Err(e) = write_sidecars(&clone_dir.join(".git"), &sidecars) {
        warn!("Removing clone of {} after metadata write failure", repo.name);
        if let Err(cleanup) = fs::remove_dir_all(&clone_dir) {
            warn!("Could not remove {}: {}", clone_dir.display(), cleanup);
        }
        return Err(Error::Sidecar {
            repository: repo.name.clone(),
            message: e.to_string(),
        });
    }

    debug!("Wrote metadata for {}", repo.name);
    Ok(clone_dir)
}

fn write_sidecars(git_dir: &Path, sidecars: &[(&str, &str)]) -> Result<()> {
    let mut staged = Vec::with_capacity(sidecars.len());
    for (name, content) in sidecars {
        let mut file = tempfile::Builder::new()
            .prefix(".sidecar-")
            .tempfile_in(git_dir)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        staged.push((*name, file));
    }

    for (name, file) in staged {
        persist(file, &git_dir.join(name))?;
    }
    Ok(())
}

fn persist(file: NamedTempFile, target: &Path) -> Result<()> {
    file.persist(target).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
