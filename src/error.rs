//! Failure taxonomy for a setup run.
//!
//! Plumbing code returns `anyhow::Result`; step functions translate those
//! into a [`SetupError`] so the orchestrator can decide how to terminate.

use thiserror::Error;

/// Why a step could not complete.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Neither creating the resource nor looking it up produced an
    /// identifier.
    #[error("resource '{name}' could not be created or found")]
    ProvisionFailed { name: String, output: String },

    /// Expected pattern absent from a command's output.
    #[error("could not find {what} in command output")]
    ParseFailure { what: String, output: String },

    /// Config or env file could not be read or written.
    #[error("{0:#}")]
    Persistence(anyhow::Error),

    /// A required command reported failure.
    #[error("command failed: {command}")]
    CommandFailed { command: String, output: String },

    /// The user cancelled a prompt.
    #[error("cancelled by user")]
    UserAbort,
}

impl SetupError {
    pub fn persistence(err: anyhow::Error) -> Self {
        SetupError::Persistence(err)
    }

    /// Captured command output to show verbatim, if any.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            SetupError::ProvisionFailed { output, .. }
            | SetupError::ParseFailure { output, .. }
            | SetupError::CommandFailed { output, .. } => {
                Some(output.as_str()).filter(|o| !o.trim().is_empty())
            }
            SetupError::Persistence(_) | SetupError::UserAbort => None,
        }
    }

    /// Process exit code for this failure. Cancellation is a failure like
    /// any other; only its message differs.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
