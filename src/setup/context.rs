//! Step names, step outcomes and the state threaded between steps

use serde::Serialize;
use std::fmt;

use crate::error::SetupError;
use crate::provision::ProvisionedResource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Step {
    AccountResolution,
    DependencyInstall,
    WorkerSettings,
    DatabaseProvisioning,
    BucketProvisioning,
    AppConfigCreation,
    CredentialSetup,
    SecretGeneration,
    Migrations,
}

impl Step {
    /// Execution order.
    pub const ALL: [Step; 9] = [
        Step::AccountResolution,
        Step::DependencyInstall,
        Step::WorkerSettings,
        Step::DatabaseProvisioning,
        Step::BucketProvisioning,
        Step::AppConfigCreation,
        Step::CredentialSetup,
        Step::SecretGeneration,
        Step::Migrations,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Step::AccountResolution => "Resolving Cloudflare account",
            Step::DependencyInstall => "Installing dependencies",
            Step::WorkerSettings => "Configuring worker settings",
            Step::DatabaseProvisioning => "Setting up D1 database",
            Step::BucketProvisioning => "Setting up R2 bucket (optional)",
            Step::AppConfigCreation => "Setting up OpenNext configuration",
            Step::CredentialSetup => "Configuring Google OAuth credentials",
            Step::SecretGeneration => "Configuring auth secret",
            Step::Migrations => "Running D1 migrations",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Outcome of one step, consumed immediately by the orchestrator.
#[derive(Debug)]
pub enum StepResult {
    Success,
    SuccessWithWarning(String),
    Fatal(SetupError),
}

impl From<SetupError> for StepResult {
    fn from(err: SetupError) -> Self {
        StepResult::Fatal(err)
    }
}

/// Whether to run the optional bucket step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketChoice {
    #[default]
    Ask,
    Create,
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Account id supplied by the environment; skips the account listing.
    pub account_id: Option<String>,
    pub bucket: BucketChoice,
}

/// Values earlier steps hand to later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetupState {
    pub account_id: Option<String>,
    pub app_name: Option<String>,
    pub database: Option<ProvisionedResource>,
    /// Bucket name written to the config, when that step ran.
    pub bucket_name: Option<String>,
}
