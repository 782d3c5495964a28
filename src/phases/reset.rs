//! Phase 1: Reset the publish directory
//!
//! The publish tree is never updated incrementally. Every build starts from
//! an empty directory so nothing from a previous run can survive.

use crate::error::Result;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Removes `publish_dir` with everything in it, then recreates it empty.
///
/// A missing directory is not an error. Failing to create it is.
pub fn execute(publish_dir: &Path) -> Result<()> {
    match fs::remove_dir_all(publish_dir) {
        Ok(()) => debug!("Removed previous output in {}", publish_dir.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs::create_dir_all(publish_dir)?;
    Ok(())
}
