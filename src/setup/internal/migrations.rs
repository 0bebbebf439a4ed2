//! Generate and apply D1 migrations

use colored::Colorize;
use tracing::debug;

use super::Ctx;
use crate::error::SetupError;
use crate::runner::{CommandOutcome, CommandSpec};
use crate::setup::context::StepResult;

/// Where a migration stage applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Local,
    Remote,
}

impl Target {
    fn flag(self) -> &'static str {
        match self {
            Target::Local => "--local",
            Target::Remote => "--remote",
        }
    }
}

pub(super) fn run_migrations(ctx: &mut Ctx<'_>) -> StepResult {
    let Some(db_name) = ctx.state.database.as_ref().map(|db| db.name.clone()) else {
        return StepResult::SuccessWithWarning(
            "No database name known; skipped migrations.".to_string(),
        );
    };

    let mut warnings = Vec::new();

    let generate = CommandSpec::from_argv(&ctx.config.migrations.generate)
        .map(|spec| spec.current_dir(&ctx.paths.root));
    match generate {
        Some(generate) => match ctx.runner.run(&generate) {
            CommandOutcome::Ok(_) => println!("  {} Migrations generated", "✓".green()),
            CommandOutcome::Err(output) => {
                if !output.trim().is_empty() {
                    println!("{output}");
                }
                warnings.push(format!(
                    "Generating migrations failed (`{}`: {}); applying existing ones.",
                    generate.display_line(),
                    last_line(&output)
                ));
            }
        },
        None => debug!("no migration generate command configured"),
    }

    for target in [Target::Local, Target::Remote] {
        let apply = ctx
            .wrangler
            .command(["d1", "migrations", "apply", db_name.as_str(), target.flag()]);
        match ctx.runner.run(&apply) {
            CommandOutcome::Ok(_) => {
                println!(
                    "  {} Migrations applied ({})",
                    "✓".green(),
                    target.flag().trim_start_matches('-')
                );
            }
            CommandOutcome::Err(output) => match target {
                // Local development depends on the local schema.
                Target::Local => {
                    return SetupError::CommandFailed {
                        command: apply.display_line(),
                        output,
                    }
                    .into();
                }
                Target::Remote => {
                    if !output.trim().is_empty() {
                        println!("{output}");
                    }
                    warnings.push(format!(
                        "Remote migrations failed; run `{}` manually.",
                        apply.display_line()
                    ));
                }
            },
        }
    }

    if warnings.is_empty() {
        StepResult::Success
    } else {
        StepResult::SuccessWithWarning(warnings.join(" "))
    }
}

/// Last non-blank line of a command's output, usually the error itself.
fn last_line(output: &str) -> &str {
    output
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::scripted::ScriptedPrompter;
    use crate::provision::{ProvisionedResource, Source};
    use crate::runner::fake::ScriptedRunner;
    use crate::setup::context::SetupOptions;
    use crate::setup::internal::test_support::{project, with_ctx};

    fn with_database(ctx: &mut Ctx<'_>) {
        ctx.state.database = Some(ProvisionedResource {
            name: "shop-db".to_string(),
            identifier: "id".to_string(),
            source: Source::Created,
        });
    }

    #[test]
    fn test_no_database_warns() {
        let tmp = project("");
        let runner = ScriptedRunner::new();
        let mut prompter = ScriptedPrompter::default();
        with_ctx(&tmp, &runner, &mut prompter, &SetupOptions::default(), |ctx| {
            assert!(matches!(
                run_migrations(ctx),
                StepResult::SuccessWithWarning(_)
            ));
        });
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_all_stages_succeed() {
        let tmp = project("");
        let runner = ScriptedRunner::new();
        let mut prompter = ScriptedPrompter::default();
        with_ctx(&tmp, &runner, &mut prompter, &SetupOptions::default(), |ctx| {
            with_database(ctx);
            assert!(matches!(run_migrations(ctx), StepResult::Success));
        });
        assert_eq!(
            runner.lines(),
            vec![
                "bunx drizzle-kit generate",
                "wrangler d1 migrations apply shop-db --local",
                "wrangler d1 migrations apply shop-db --remote",
            ]
        );
        assert!(runner
            .calls()
            .iter()
            .all(|call| call.cwd.as_deref() == Some(tmp.path())));
    }

    #[test]
    fn test_local_failure_is_fatal() {
        let tmp = project("");
        let runner = ScriptedRunner::new().err(
            "wrangler d1 migrations apply shop-db --local",
            "no such table",
        );
        let mut prompter = ScriptedPrompter::default();
        with_ctx(&tmp, &runner, &mut prompter, &SetupOptions::default(), |ctx| {
            with_database(ctx);
            match run_migrations(ctx) {
                StepResult::Fatal(err) => assert_eq!(err.captured_output(), Some("no such table")),
                other => panic!("expected fatal, got {other:?}"),
            }
        });
        // Remote never attempted
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_generate_and_remote_failures_warn() {
        let tmp = project("");
        let runner = ScriptedRunner::new()
            .err("bunx drizzle-kit", "drizzle-kit: not found")
            .err("wrangler d1 migrations apply shop-db --remote", "auth");
        let mut prompter = ScriptedPrompter::default();
        with_ctx(&tmp, &runner, &mut prompter, &SetupOptions::default(), |ctx| {
            with_database(ctx);
            match run_migrations(ctx) {
                StepResult::SuccessWithWarning(message) => {
                    assert!(message.contains("Generating migrations failed"));
                    assert!(message.contains("drizzle-kit: not found"));
                    assert!(message.contains("--remote"));
                }
                other => panic!("expected warning, got {other:?}"),
            }
        });
    }

    #[test]
    fn test_last_line() {
        assert_eq!(last_line("Reading schema\nError: no schema found\n\n"), "Error: no schema found");
        assert_eq!(last_line("  \n"), "no output");
    }
}
