//! Dependency install, worker settings, OpenNext config file

use colored::Colorize;
use std::fs;

use super::Ctx;
use crate::error::SetupError;
use crate::runner::{CommandOutcome, CommandSpec};
use crate::setup::context::StepResult;
use crate::wrangler::apply_worker_settings;

const OPEN_NEXT_CONFIG_TEMPLATE: &str = r#"// OpenNext configuration for Cloudflare Workers.
// See https://opennext.js.org/cloudflare for available options.
import { defineCloudflareConfig } from "@opennextjs/cloudflare";

export default defineCloudflareConfig({
  // incrementalCache, queue and tagCache overrides go here.
});
"#;

pub(super) fn install_dependencies(ctx: &mut Ctx<'_>) -> StepResult {
    let Some(install) = CommandSpec::from_argv(&ctx.config.dependencies.install)
        .map(|spec| spec.current_dir(&ctx.paths.root))
    else {
        return StepResult::SuccessWithWarning(
            "No dependency install command configured; skipped.".to_string(),
        );
    };

    match ctx.runner.run(&install) {
        // Package managers sometimes exit 0 after printing an error.
        CommandOutcome::Ok(output) if output.contains("error:") => SetupError::CommandFailed {
            command: install.display_line(),
            output,
        }
        .into(),
        CommandOutcome::Ok(_) => {
            println!("  {} Dependencies installed", "✓".green());
            StepResult::Success
        }
        CommandOutcome::Err(output) => SetupError::CommandFailed {
            command: install.display_line(),
            output,
        }
        .into(),
    }
}

pub(super) fn configure_worker(ctx: &mut Ctx<'_>) -> StepResult {
    let mut doc = match ctx.load_document() {
        Ok(doc) => doc,
        Err(e) => {
            println!(
                "  {}",
                "Make sure a wrangler.toml exists at the project root.".yellow()
            );
            return e.into();
        }
    };

    let default_name = doc
        .get_str("name")
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| ctx.project_name());
    let app_name = match ctx
        .prompter
        .text("Name for your Workers application", &default_name)
    {
        Ok(name) => name,
        Err(e) => return e.into(),
    };

    let report = apply_worker_settings(&mut doc, &ctx.config.worker, &app_name);
    if report.removed_pages_output_dir {
        println!(
            "  {}",
            "Removed 'pages_build_output_dir' (Pages-only setting).".yellow()
        );
    }

    if let Err(e) = ctx.store_document(&doc) {
        return e.into();
    }
    println!(
        "  {} {} updated (app: {})",
        "✓".green(),
        ctx.config.wrangler.config_file,
        app_name
    );
    ctx.state.app_name = Some(app_name);
    StepResult::Success
}

pub(super) fn create_open_next_config(ctx: &mut Ctx<'_>) -> StepResult {
    let path = &ctx.paths.open_next_config;
    if path.exists() {
        println!("  {} already exists, leaving it alone", path.display());
        return StepResult::Success;
    }

    match fs::write(path, OPEN_NEXT_CONFIG_TEMPLATE) {
        Ok(()) => {
            println!("  {} Created {}", "✓".green(), path.display());
            StepResult::Success
        }
        Err(e) => StepResult::SuccessWithWarning(format!(
            "Could not create {}: {}",
            path.display(),
            e
        )),
    }
}
