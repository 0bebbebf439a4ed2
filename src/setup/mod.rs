//! Setup orchestrator - sequence the steps, decide continue vs. abort
//!
//! ```text
//! AccountResolution → DependencyInstall → WorkerSettings
//!   → DatabaseProvisioning → BucketProvisioning (optional)
//!   → AppConfigCreation → CredentialSetup → SecretGeneration
//!   → Migrations → Done
//! ```
//!
//! Each step returns a [`StepResult`]. `Fatal` stops the run at once and is
//! handed back to the caller, which owns process termination. Warnings are
//! printed and collected, and the run continues.
//!
//! Steps that touch `wrangler.toml` load it themselves rather than sharing
//! one in-memory copy, so a run interrupted halfway can simply be started
//! again: provisioning discovers what already exists and binding
//! reconciliation replaces rather than duplicates.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use worker_setup::config::SetupConfig;
//! use worker_setup::parse::WranglerFormat;
//! use worker_setup::prompt::TerminalPrompter;
//! use worker_setup::runner::SystemRunner;
//! use worker_setup::setup::{self, SetupOptions};
//!
//! let root = Path::new(".");
//! let config = SetupConfig::load(root)?;
//! let mut prompter = TerminalPrompter::stdin();
//! let report = setup::run(
//!     root,
//!     &config,
//!     &SetupOptions::default(),
//!     &SystemRunner::new(),
//!     &WranglerFormat,
//!     &mut prompter,
//! );
//! # Ok::<(), anyhow::Error>(())
//! ```

mod context;
mod internal;

use std::path::Path;

pub use context::{BucketChoice, SetupOptions, SetupState, Step, StepResult};
pub use internal::{print_failure, print_summary, ACCOUNT_ENV};

use crate::config::SetupConfig;
use crate::error::SetupError;
use crate::parse::OutputFormat;
use crate::prompt::Prompter;
use crate::runner::CommandRunner;

/// A completed run.
#[derive(Debug)]
pub struct SetupReport {
    pub state: SetupState,
    pub warnings: Vec<(Step, String)>,
}

/// A run stopped by a fatal step.
#[derive(Debug)]
pub struct SetupFailure {
    pub step: Step,
    pub error: SetupError,
    pub state: SetupState,
}

impl SetupFailure {
    pub fn exit_code(&self) -> i32 {
        self.error.exit_code()
    }
}

/// Run every step in order against the project at `root`.
pub fn run(
    root: &Path,
    config: &SetupConfig,
    options: &SetupOptions,
    runner: &dyn CommandRunner,
    format: &dyn OutputFormat,
    prompter: &mut dyn Prompter,
) -> Result<SetupReport, SetupFailure> {
    internal::run_steps(root, config, options, runner, format, prompter)
}
