//! Implementation of the phases of a site build.
//!
//! ## Overview
//!
//! A build runs these phases in order:
//! 1. Reset - Wipe and recreate the publish directory
//! 2. Provision - Clone and compile the renderer (unless a prebuilt one is configured)
//! 3. Listing - Fetch and validate the account's repositories
//! 4. Materialize - Clone each repository and write its sidecar metadata
//! 5. Pages - Render each repository into its own publish subdirectory
//! 6. Index - Render the top-level index over every clone
//!
//! Phases 4 and 5 run back to back for one repository before the next
//! repository starts (or concurrently across repositories, see
//! [`orchestrator`]). Phase 6 runs once, after all of them.

use crate::defaults::STATIC_ASSETS;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

// Phase modules
pub mod index;
pub mod listing;
pub mod materialize;
pub mod orchestrator;
pub mod pages;
pub mod provision;
pub mod reset;

pub use reset as phase1;
pub use provision as phase2;
pub use listing as phase3;
pub use materialize as phase4;
pub use pages as phase5;
pub use index as phase6;

/// Copies `favicon.png`, `logo.png` and `style.css` from `static_dir` into
/// `dest_dir`, overwriting existing copies.
pub fn copy_static_assets(static_dir: &Path, dest_dir: &Path) -> Result<()> {
    for asset in STATIC_ASSETS {
        let source = static_dir.join(asset);
        fs::copy(&source, dest_dir.join(asset)).map_err(|e| Error::StaticAsset {
            path: source.display().to_string(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}
