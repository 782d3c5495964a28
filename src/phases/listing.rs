//! Phase 3: List the repositories to mirror
//!
//! Asks the lister for the account's repositories and rejects listings that
//! could not be laid out on disk. Nothing is cloned before this phase
//! succeeds.

use crate::error::Result;
use crate::listing::{self, RepositoryDescriptor, RepositoryLister};
use log::{info, warn};

/// Lists and validates `account`'s repositories, preserving listing order.
pub fn execute(lister: &dyn RepositoryLister, account: &str) -> Result<Vec<RepositoryDescriptor>> {
    info!("Listing repositories for {}", account);
    let repositories = lister.list(account)?;
    listing::validate(&repositories)?;

    if repositories.is_empty() {
        warn!("{} has no repositories; only the index will be generated", account);
    }
    Ok(repositories)
}
