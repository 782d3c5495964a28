//! # stagit-site CLI
//!
//! This is the binary entry point for the `stagit-site` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the requested command and turning library errors into a
//!   non-zero exit status.
//!
//! The build logic lives in the `stagit_site` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
