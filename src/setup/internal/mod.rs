//! Step sequencing and the shared step context

mod account;
mod credentials;
mod migrations;
mod project;
mod resources;

pub use account::ACCOUNT_ENV;

use colored::Colorize;
use std::path::Path;
use tracing::{info, warn};

use super::context::{SetupOptions, SetupState, Step, StepResult};
use super::{SetupFailure, SetupReport};
use crate::config::SetupConfig;
use crate::error::SetupError;
use crate::parse::OutputFormat;
use crate::paths::ProjectPaths;
use crate::prompt::Prompter;
use crate::provision::WranglerCli;
use crate::runner::CommandRunner;
use crate::wrangler::ConfigDocument;

/// Everything a step may use. Steps communicate only through `state`.
pub(super) struct Ctx<'a> {
    pub paths: ProjectPaths,
    pub config: &'a SetupConfig,
    pub options: &'a SetupOptions,
    pub runner: &'a dyn CommandRunner,
    pub format: &'a dyn OutputFormat,
    pub prompter: &'a mut dyn Prompter,
    pub wrangler: WranglerCli,
    pub state: SetupState,
}

impl Ctx<'_> {
    /// Fresh read of the config document.
    pub fn load_document(&self) -> Result<ConfigDocument, SetupError> {
        ConfigDocument::load(&self.paths.wrangler_toml).map_err(SetupError::persistence)
    }

    pub fn store_document(&self, doc: &ConfigDocument) -> Result<(), SetupError> {
        doc.store(&self.paths.wrangler_toml)
            .map_err(SetupError::persistence)
    }

    /// Project directory name, the base for default resource names.
    pub fn project_name(&self) -> String {
        self.paths.project_name()
    }
}

pub(super) fn run_steps(
    root: &Path,
    config: &SetupConfig,
    options: &SetupOptions,
    runner: &dyn CommandRunner,
    format: &dyn OutputFormat,
    prompter: &mut dyn Prompter,
) -> Result<SetupReport, SetupFailure> {
    let mut ctx = Ctx {
        paths: ProjectPaths::new(root, config),
        config,
        options,
        runner,
        format,
        prompter,
        wrangler: wrangler_cli(config, root),
        state: SetupState::default(),
    };
    let mut warnings = Vec::new();

    for step in Step::ALL {
        println!("\n{} {}", "▸".cyan(), step.title().bold());
        info!(?step, "step started");

        match run_step(step, &mut ctx) {
            StepResult::Success => {}
            StepResult::SuccessWithWarning(message) => {
                warn!(?step, %message, "step degraded");
                println!("  {}", format!("⚠️  {message}").yellow());
                warnings.push((step, message));
            }
            StepResult::Fatal(error) => {
                return Err(SetupFailure {
                    step,
                    error,
                    state: ctx.state,
                });
            }
        }
    }

    Ok(SetupReport {
        state: ctx.state,
        warnings,
    })
}

/// Wrangler invocations for the project at `root`.
fn wrangler_cli(config: &SetupConfig, root: &Path) -> WranglerCli {
    WranglerCli::new(config.wrangler.command.clone())
        .with_config_file(&config.wrangler.config_file)
        .in_dir(root)
}

fn run_step(step: Step, ctx: &mut Ctx<'_>) -> StepResult {
    match step {
        Step::AccountResolution => account::resolve_account(ctx),
        Step::DependencyInstall => project::install_dependencies(ctx),
        Step::WorkerSettings => project::configure_worker(ctx),
        Step::DatabaseProvisioning => resources::provision_database(ctx),
        Step::BucketProvisioning => resources::provision_bucket(ctx),
        Step::AppConfigCreation => project::create_open_next_config(ctx),
        Step::CredentialSetup => credentials::prompt_oauth_credentials(ctx),
        Step::SecretGeneration => credentials::ensure_auth_secret(ctx),
        Step::Migrations => migrations::run_migrations(ctx),
    }
}

/// Print a fatal failure, including captured command output verbatim.
pub fn print_failure(failure: &SetupFailure) {
    match failure.error {
        SetupError::UserAbort => {
            eprintln!("\n{}", "Operation cancelled.".yellow());
        }
        _ => {
            eprintln!(
                "\n{} {}",
                "✗".red(),
                format!("{} failed: {}", failure.step, failure.error).red()
            );
            if let Some(output) = failure.error.captured_output() {
                eprintln!("{output}");
            }
        }
    }
}

/// Print the closing summary and next steps of a completed run.
pub fn print_summary(report: &SetupReport) {
    println!("\n{}", "✅ Setup completed.".green().bold());

    let state = &report.state;
    if let Some(app) = &state.app_name {
        println!("  Worker:    {app}");
    }
    if let Some(db) = &state.database {
        println!("  Database:  {} ({})", db.name, db.identifier);
    }
    if let Some(bucket) = &state.bucket_name {
        println!("  Bucket:    {bucket}");
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Finished with warnings:".yellow());
        for (step, message) in &report.warnings {
            println!("  • {step}: {message}");
        }
    }

    println!("\n{}", "Next steps:".bold());
    println!("  1. Add OpenNext scripts to package.json:");
    println!("       \"preview\": \"opennextjs-cloudflare build && opennextjs-cloudflare preview\"");
    println!("       \"deploy\":  \"opennextjs-cloudflare build && opennextjs-cloudflare deploy\"");
    println!("  2. Review wrangler.toml and .dev.vars");
    println!("  3. Start developing:   bun run dev");
    println!("  4. Preview on workerd: bun run preview");
    println!("  5. Deploy:             bun run deploy");
}
