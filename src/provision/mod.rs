//! Resource provisioner - create, or discover what already exists
//!
//! Wrangler's create commands are not idempotent: creating a resource that
//! already exists is an error. Discovery on failure is what makes a
//! re-run of the whole setup safe.
//!
//! ```text
//! create ──ok + id──────────────────────────▶ Provisioned(created)
//!   │
//!   └─failed / no id──▶ describe ──id──────▶ Provisioned(discovered)
//!                          │
//!                          └─nothing──────▶ Fatal
//! ```

mod internal;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::parse::OutputFormat;
use crate::runner::{CommandOutcome, CommandRunner, CommandSpec};

pub use internal::provision;

/// Where a provisioned resource's identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Created,
    Discovered,
}

/// A resource known to exist, with the identifier the config needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionedResource {
    pub name: String,
    pub identifier: String,
    pub source: Source,
}

/// Both create and describe came back without an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionFailure {
    pub name: String,
    /// Output of the create attempt.
    pub create_output: String,
    /// Output of the describe attempt.
    pub describe_output: String,
}

impl ProvisionFailure {
    /// Both captured outputs, for verbatim display.
    pub fn combined_output(&self) -> String {
        [self.create_output.trim_end(), self.describe_output.trim_end()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One kind of provisionable resource.
pub trait ResourceKind {
    /// Human label ("D1 database", "R2 bucket").
    fn label(&self) -> &'static str;

    fn create_command(&self, name: &str) -> CommandSpec;

    fn describe_command(&self, name: &str) -> CommandSpec;

    /// Identifier from a create attempt.
    fn created_identifier(
        &self,
        format: &dyn OutputFormat,
        name: &str,
        outcome: &CommandOutcome,
    ) -> Option<String>;

    /// Identifier from a describe attempt.
    fn discovered_identifier(
        &self,
        format: &dyn OutputFormat,
        name: &str,
        outcome: &CommandOutcome,
    ) -> Option<String>;
}

/// Config file wrangler reads when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "wrangler.toml";

/// Wrangler command prefix plus the env, directory and config file shared
/// by every invocation.
#[derive(Debug, Clone)]
pub struct WranglerCli {
    argv: Vec<String>,
    env: Vec<(String, String)>,
    cwd: Option<PathBuf>,
    config_file: Option<String>,
}

impl WranglerCli {
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            env: Vec::new(),
            cwd: None,
            config_file: None,
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Run every command from the project root.
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Pass `--config <file>` unless it is the file wrangler reads anyway.
    pub fn with_config_file(mut self, file: &str) -> Self {
        self.config_file = (file != DEFAULT_CONFIG_FILE).then(|| file.to_string());
        self
    }

    /// `<prefix> <args...> [--config <file>]` with the shared env and
    /// directory attached.
    pub fn command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (program, prefix) = match self.argv.split_first() {
            Some((program, prefix)) => (program.as_str(), prefix),
            None => ("wrangler", &[][..]),
        };
        let mut spec = CommandSpec::new(program)
            .args(prefix.iter().cloned())
            .args(args);
        if let Some(file) = &self.config_file {
            spec = spec.args(["--config", file.as_str()]);
        }
        for (k, v) in &self.env {
            spec = spec.env(k.clone(), v.clone());
        }
        if let Some(dir) = &self.cwd {
            spec = spec.current_dir(dir);
        }
        spec
    }
}

/// D1 database: `d1 create` then `d1 info`.
#[derive(Debug, Clone)]
pub struct D1Database<'a> {
    pub cli: &'a WranglerCli,
}

impl ResourceKind for D1Database<'_> {
    fn label(&self) -> &'static str {
        "D1 database"
    }

    fn create_command(&self, name: &str) -> CommandSpec {
        self.cli.command(["d1", "create", name])
    }

    fn describe_command(&self, name: &str) -> CommandSpec {
        self.cli.command(["d1", "info", name])
    }

    fn created_identifier(
        &self,
        format: &dyn OutputFormat,
        _name: &str,
        outcome: &CommandOutcome,
    ) -> Option<String> {
        format.database_id(outcome.stdout()?)
    }

    fn discovered_identifier(
        &self,
        format: &dyn OutputFormat,
        _name: &str,
        outcome: &CommandOutcome,
    ) -> Option<String> {
        format.database_id(outcome.stdout()?)
    }
}

/// R2 bucket: `r2 bucket create` then `r2 bucket info`. Buckets are
/// addressed by name, so the name is the identifier.
#[derive(Debug, Clone)]
pub struct R2Bucket<'a> {
    pub cli: &'a WranglerCli,
}

impl ResourceKind for R2Bucket<'_> {
    fn label(&self) -> &'static str {
        "R2 bucket"
    }

    fn create_command(&self, name: &str) -> CommandSpec {
        self.cli.command(["r2", "bucket", "create", name])
    }

    fn describe_command(&self, name: &str) -> CommandSpec {
        self.cli.command(["r2", "bucket", "info", name])
    }

    fn created_identifier(
        &self,
        _format: &dyn OutputFormat,
        name: &str,
        outcome: &CommandOutcome,
    ) -> Option<String> {
        outcome.is_ok().then(|| name.to_string())
    }

    fn discovered_identifier(
        &self,
        format: &dyn OutputFormat,
        name: &str,
        outcome: &CommandOutcome,
    ) -> Option<String> {
        format.bucket_name(outcome.stdout()?, name)
    }
}

/// Provision a D1 database by name.
pub fn provision_database(
    runner: &dyn CommandRunner,
    format: &dyn OutputFormat,
    cli: &WranglerCli,
    name: &str,
) -> Result<ProvisionedResource, ProvisionFailure> {
    provision(runner, format, &D1Database { cli }, name)
}

/// Provision an R2 bucket by name.
pub fn provision_bucket(
    runner: &dyn CommandRunner,
    format: &dyn OutputFormat,
    cli: &WranglerCli,
    name: &str,
) -> Result<ProvisionedResource, ProvisionFailure> {
    provision(runner, format, &R2Bucket { cli }, name)
}
