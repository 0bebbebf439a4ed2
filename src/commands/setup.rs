use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use worker_setup::config::SetupConfig;
use worker_setup::parse::WranglerFormat;
use worker_setup::prompt::{DefaultsPrompter, Prompter, TerminalPrompter};
use worker_setup::runner::SystemRunner;
use worker_setup::setup::{self, BucketChoice, SetupOptions, ACCOUNT_ENV};

/// Run the full setup. Returns the process exit code.
pub fn execute(
    project_dir: Option<PathBuf>,
    yes: bool,
    skip_bucket: bool,
    with_bucket: bool,
) -> Result<i32> {
    let root = match project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let config = SetupConfig::load(&root)?;

    let bucket = if with_bucket {
        BucketChoice::Create
    } else if skip_bucket || yes {
        BucketChoice::Skip
    } else {
        BucketChoice::Ask
    };
    let options = SetupOptions {
        account_id: std::env::var(ACCOUNT_ENV).ok().filter(|v| !v.trim().is_empty()),
        bucket,
    };

    println!("{}", "🚀 Setting up Next.js on Cloudflare Workers".bold());
    println!("   Project: {}", root.display());

    let mut prompter: Box<dyn Prompter> = if yes {
        Box::new(DefaultsPrompter)
    } else {
        Box::new(TerminalPrompter::stdin())
    };

    match setup::run(
        &root,
        &config,
        &options,
        &SystemRunner::new(),
        &WranglerFormat,
        prompter.as_mut(),
    ) {
        Ok(report) => {
            setup::print_summary(&report);
            Ok(0)
        }
        Err(failure) => {
            setup::print_failure(&failure);
            Ok(failure.exit_code())
        }
    }
}
