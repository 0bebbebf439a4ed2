//! Process spawning for the system runner

use colored::Colorize;
use std::process::{Command, Stdio};
use tracing::debug;

use super::{CommandOutcome, CommandSpec, FORCED_LOCALE};

pub(super) fn run_process(spec: &CommandSpec, echo: bool) -> CommandOutcome {
    if echo {
        println!("{}", spec.display_line().yellow());
    }

    // Resolve through PATH first so a missing tool reads as such.
    let program = match which::which(&spec.program) {
        Ok(path) => path,
        Err(_) => {
            debug!(program = %spec.program, "program not found on PATH");
            return CommandOutcome::Err(format!("{}: command not found", spec.program));
        }
    };

    let mut command = Command::new(&program);
    command
        .args(&spec.args)
        .env("LC_ALL", FORCED_LOCALE)
        .env("LANG", FORCED_LOCALE)
        .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null());
    if let Some(dir) = &spec.cwd {
        command.current_dir(dir);
    }
    let result = command.output();

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            debug!(command = %spec, error = %e, "spawn failed");
            return CommandOutcome::Err(format!("Failed to run {}: {}", spec, e));
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    debug!(command = %spec, status = ?output.status.code(), "command finished");

    if output.status.success() {
        CommandOutcome::Ok(stdout)
    } else {
        let message = failure_message(&stdout, &stderr);
        if message.is_empty() {
            CommandOutcome::Err(format!("{} exited with {}", spec, output.status))
        } else {
            CommandOutcome::Err(message)
        }
    }
}

/// Stdout and stderr of a failed command, blank streams dropped.
fn failure_message(stdout: &str, stderr: &str) -> String {
    [stdout.trim_end(), stderr.trim_end()]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
