//! # stagit-site Library
//!
//! This library builds a static HTML mirror of an account's git repositories.
//! It is used by the `stagit-site` command-line tool, and the pipeline can be
//! driven directly through [`phases::orchestrator::SiteBuilder`].
//!
//! ## Quick Example
//!
//! ```
//! use stagit_site::config;
//! use stagit_site::listing::validate_name;
//!
//! let config = config::parse("account: octocat\njobs: 2\n").unwrap();
//! assert_eq!(config.account, "octocat");
//! assert_eq!(config.publish_dir, std::path::PathBuf::from("public"));
//!
//! assert!(validate_name("dotfiles").is_ok());
//! assert!(validate_name("../etc").is_err());
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`, `defaults`)**: the account, owner, static
//!   assets and output locations of a build, with documented defaults.
//! - **Listing (`listing`)**: fetching and validating the repositories to
//!   mirror from the hosting service's API.
//! - **Operations (`operations`, `git`, `process`)**: the external tools a
//!   build drives (`git`, `make`, stagit), behind mockable traits and run
//!   under a timeout.
//! - **Phases (`phases`)**: the build pipeline itself.
//!
//! ## Execution Flow
//!
//! 1.  **Reset**: wipe and recreate the publish directory.
//! 2.  **Provision**: clone and compile stagit into a temporary directory.
//! 3.  **Listing**: list the account's repositories.
//! 4.  **Materialize**: clone each repository into a temporary staging
//!     workspace and write its `description`, `owner` and `url` files.
//! 5.  **Pages**: render each repository into `public/<name>/`.
//! 6.  **Index**: render `public/index.html` over every clone.
//!
//! Both temporary directories are removed when the build ends, successfully
//! or not.

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod listing;
pub mod operations;
pub mod output;
pub mod phases;
pub mod process;

#[cfg(test)]
mod name_proptest;
