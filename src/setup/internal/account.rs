//! Account resolution

use colored::Colorize;
use tracing::debug;

use super::Ctx;
use crate::error::SetupError;
use crate::runner::CommandOutcome;
use crate::setup::context::StepResult;

pub const ACCOUNT_ENV: &str = "CLOUDFLARE_ACCOUNT_ID";

/// Decide which account every later wrangler call runs against.
pub(super) fn resolve_account(ctx: &mut Ctx<'_>) -> StepResult {
    if let Some(id) = ctx.options.account_id.clone() {
        println!("  Using {ACCOUNT_ENV} from environment: {id}");
        use_account(ctx, id);
        return StepResult::Success;
    }

    let whoami = ctx.wrangler.command(["whoami"]);
    let output = match ctx.runner.run(&whoami) {
        CommandOutcome::Ok(output) => output,
        CommandOutcome::Err(message) => {
            println!(
                "  {}",
                "Could not read account info. Are you logged in (`wrangler login`)?".red()
            );
            return SetupError::CommandFailed {
                command: whoami.display_line(),
                output: message,
            }
            .into();
        }
    };

    let accounts = ctx.format.accounts(&output);
    debug!(count = accounts.len(), "accounts parsed from listing");

    let id = match accounts.len() {
        0 => {
            if ctx.format.mentions_account(&output) {
                println!(
                    "  {}",
                    "Could not read your account id from the account listing.".red()
                );
                println!(
                    "  {}",
                    "Find it in the Cloudflare dashboard sidebar.".yellow()
                );
            }
            println!(
                "  {}",
                format!("Set {ACCOUNT_ENV} and re-run setup: {}", export_hint(ACCOUNT_ENV))
                    .yellow()
            );
            return SetupError::ParseFailure {
                what: "a Cloudflare account id".to_string(),
                output,
            }
            .into();
        }
        1 => accounts[0].account_id.clone(),
        _ => {
            let options: Vec<String> = accounts
                .iter()
                .map(|a| format!("{} (ID: {})", a.display_name, a.account_id))
                .collect();
            match ctx
                .prompter
                .select("Select a Cloudflare account to use:", &options)
            {
                Ok(index) => match accounts.get(index) {
                    Some(account) => account.account_id.clone(),
                    None => return SetupError::UserAbort.into(),
                },
                Err(e) => return e.into(),
            }
        }
    };

    println!("  {} Using account {}", "✓".green(), id);
    println!(
        "  {}",
        format!("Tip: set {ACCOUNT_ENV} to skip this lookup next time.").dimmed()
    );
    use_account(ctx, id);
    StepResult::Success
}

/// Record the account and pass it to every later wrangler invocation.
fn use_account(ctx: &mut Ctx<'_>, id: String) {
    ctx.wrangler = ctx.wrangler.clone().with_env(ACCOUNT_ENV, id.clone());
    ctx.state.account_id = Some(id);
}

/// Shell command that sets `name` for the current platform.
fn export_hint(name: &str) -> String {
    if cfg!(windows) {
        format!("set {name}=<account_id> (Command Prompt) or $env:{name}=\"<account_id>\" (PowerShell)")
    } else {
        format!("export {name}=\"<account_id>\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::scripted::ScriptedPrompter;
    use crate::runner::fake::ScriptedRunner;
    use crate::setup::context::SetupOptions;
    use crate::setup::internal::test_support::{project, with_ctx};

    const TWO_ACCOUNTS: &str = "\
│ Account Name │ Account ID                       │
│ Personal     │ 0123456789abcdef0123456789abcdef │
│ Work         │ fedcba9876543210fedcba9876543210 │
";

    #[test]
    fn test_env_override_skips_listing() {
        let tmp = project("");
        let runner = ScriptedRunner::new();
        let mut prompter = ScriptedPrompter::default();
        let options = SetupOptions {
            account_id: Some("abc".to_string()),
            ..Default::default()
        };
        with_ctx(&tmp, &runner, &mut prompter, &options, |ctx| {
            assert!(matches!(resolve_account(ctx), StepResult::Success));
            assert_eq!(ctx.state.account_id.as_deref(), Some("abc"));
            let spec = ctx.wrangler.command(["d1", "list"]);
            assert!(spec.env.contains(&(ACCOUNT_ENV.to_string(), "abc".to_string())));
        });
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_single_account_used_directly() {
        let tmp = project("");
        let runner = ScriptedRunner::new().ok(
            "wrangler whoami",
            "│ Solo │ 0123456789abcdef0123456789abcdef │\n",
        );
        let mut prompter = ScriptedPrompter::default();
        with_ctx(&tmp, &runner, &mut prompter, &SetupOptions::default(), |ctx| {
            assert!(matches!(resolve_account(ctx), StepResult::Success));
            assert_eq!(
                ctx.state.account_id.as_deref(),
                Some("0123456789abcdef0123456789abcdef")
            );
        });
    }

    #[test]
    fn test_multiple_accounts_prompt() {
        let tmp = project("");
        let runner = ScriptedRunner::new().ok("wrangler whoami", TWO_ACCOUNTS);
        let mut prompter = ScriptedPrompter::new(["1"]);
        with_ctx(&tmp, &runner, &mut prompter, &SetupOptions::default(), |ctx| {
            assert!(matches!(resolve_account(ctx), StepResult::Success));
            assert_eq!(
                ctx.state.account_id.as_deref(),
                Some("fedcba9876543210fedcba9876543210")
            );
        });
    }

    #[test]
    fn test_cancelled_selection_is_user_abort() {
        let tmp = project("");
        let runner = ScriptedRunner::new().ok("wrangler whoami", TWO_ACCOUNTS);
        let mut prompter = ScriptedPrompter::default();
        with_ctx(&tmp, &runner, &mut prompter, &SetupOptions::default(), |ctx| {
            assert!(matches!(
                resolve_account(ctx),
                StepResult::Fatal(SetupError::UserAbort)
            ));
        });
    }

    #[test]
    fn test_listing_failure_is_fatal_with_output() {
        let tmp = project("");
        let runner = ScriptedRunner::new().err("wrangler whoami", "You are not authenticated.");
        let mut prompter = ScriptedPrompter::default();
        with_ctx(&tmp, &runner, &mut prompter, &SetupOptions::default(), |ctx| {
            match resolve_account(ctx) {
                StepResult::Fatal(err) => {
                    assert_eq!(err.captured_output(), Some("You are not authenticated."));
                }
                other => panic!("expected fatal, got {other:?}"),
            }
        });
    }

    #[test]
    fn test_no_parsable_accounts_is_fatal() {
        let tmp = project("");
        let runner = ScriptedRunner::new().ok(
            "wrangler whoami",
            "You are logged in with an API Token, associated with an account.",
        );
        let mut prompter = ScriptedPrompter::default();
        with_ctx(&tmp, &runner, &mut prompter, &SetupOptions::default(), |ctx| {
            assert!(matches!(
                resolve_account(ctx),
                StepResult::Fatal(SetupError::ParseFailure { .. })
            ));
            assert!(ctx.state.account_id.is_none());
        });
    }

    #[test]
    fn test_export_hint() {
        let hint = export_hint("X");
        assert!(hint.contains("X"));
    }
}
