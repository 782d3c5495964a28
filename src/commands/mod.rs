//! # CLI Command Implementations
//!
//! Each subcommand of the `stagit-site` tool lives in its own file with:
//! - An `Args` struct deriving `clap::Args` for its options.
//! - An `execute` function that turns those options into library calls.

pub mod build;
