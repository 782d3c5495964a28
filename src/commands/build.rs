//! Build command implementation
//!
//! Resolves the configuration (file, then flag overrides), runs every phase
//! of the site build, and reports the outcome.

use anyhow::{Context, Result};
use clap::Args;
use stagit_site::config::{self, SiteConfig};
use stagit_site::defaults::CONFIG_FILE_NAME;
use stagit_site::output::{format_elapsed, status_line, OutputConfig, Status};
use stagit_site::phases::orchestrator::SiteBuilder;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Path to config file (defaults to ./stagit-site.yaml when present)
    #[arg(short, long, value_name = "PATH", env = "STAGIT_SITE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Account whose repositories are mirrored
    #[arg(long, value_name = "NAME")]
    pub account: Option<String>,

    /// Output directory, wiped before every build
    #[arg(long, value_name = "PATH")]
    pub publish_dir: Option<PathBuf>,

    /// Directory holding favicon.png, logo.png and style.css
    #[arg(long, value_name = "PATH")]
    pub static_dir: Option<PathBuf>,

    /// Directory with prebuilt stagit and stagit-index binaries
    #[arg(long, value_name = "PATH")]
    pub renderer_dir: Option<PathBuf>,

    /// Number of repositories processed concurrently
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// API token for the repository listing
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Loads the configuration file (if any) and applies flag overrides.
pub fn resolve_config(args: &BuildArgs) -> Result<SiteConfig> {
    let mut config = match &args.config {
        Some(path) => config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None if PathBuf::from(CONFIG_FILE_NAME).is_file() => config::from_file(CONFIG_FILE_NAME)
            .with_context(|| format!("Failed to load configuration from {}", CONFIG_FILE_NAME))?,
        None => SiteConfig::default(),
    };

    if let Some(account) = &args.account {
        config.account = account.clone();
    }
    if let Some(dir) = &args.publish_dir {
        config.publish_dir = dir.clone();
    }
    if let Some(dir) = &args.static_dir {
        config.static_dir = dir.clone();
    }
    if let Some(dir) = &args.renderer_dir {
        config.renderer_dir = Some(dir.clone());
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }

    config.validate()?;
    Ok(config)
}

/// Execute the build command
pub fn execute(args: BuildArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();
    let config = resolve_config(&args)?;

    if !args.quiet {
        println!(
            "{}",
            status_line(
                output,
                Status::Start,
                &format!(
                    "Building site for {} into {}",
                    config.account,
                    config.publish_dir.display()
                ),
            )
        );
    }

    let builder = SiteBuilder::new(config, args.token.clone())?;
    match builder.build() {
        Ok(summary) => {
            if !args.quiet {
                println!(
                    "{}",
                    status_line(
                        output,
                        Status::Success,
                        &format!(
                            "Published {} repositories to {} in {}",
                            summary.repositories.len(),
                            summary.publish_dir.display(),
                            format_elapsed(start_time.elapsed())
                        ),
                    )
                );
            }
            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                eprintln!("{}", status_line(output, Status::Failure, "Build failed"));
            }
            Err(e.into())
        }
    }
}
