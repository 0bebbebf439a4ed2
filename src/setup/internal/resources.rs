//! D1 database and R2 bucket steps

use colored::Colorize;

use super::Ctx;
use crate::error::SetupError;
use crate::provision::{self, ProvisionedResource, Source};
use crate::setup::context::{BucketChoice, StepResult};
use crate::wrangler::{D1Binding, R2Binding};

pub(super) fn provision_database(ctx: &mut Ctx<'_>) -> StepResult {
    let default_name = format!("{}-db", ctx.project_name());
    let name = match ctx.prompter.text("Name for your D1 database", &default_name) {
        Ok(name) => name,
        Err(e) => return e.into(),
    };

    // Read before creating anything so a broken config fails fast.
    let mut doc = match ctx.load_document() {
        Ok(doc) => doc,
        Err(e) => return e.into(),
    };

    let resource = match provision::provision_database(ctx.runner, ctx.format, &ctx.wrangler, &name)
    {
        Ok(resource) => resource,
        Err(failure) => {
            return SetupError::ProvisionFailed {
                output: failure.combined_output(),
                name: failure.name,
            }
            .into();
        }
    };
    report_resource("D1 database", &resource);

    let binding = D1Binding {
        binding: ctx.config.database.binding.clone(),
        database_name: resource.name.clone(),
        database_id: resource.identifier.clone(),
        migrations_dir: ctx.config.database.migrations_dir.clone(),
    };
    if let Err(e) = doc.upsert_binding(&binding) {
        return SetupError::persistence(e).into();
    }
    if let Err(e) = ctx.store_document(&doc) {
        return e.into();
    }
    println!(
        "  {} Binding {} written to {}",
        "✓".green(),
        binding.binding,
        ctx.config.wrangler.config_file
    );

    ctx.state.database = Some(resource);
    StepResult::Success
}

pub(super) fn provision_bucket(ctx: &mut Ctx<'_>) -> StepResult {
    let wanted = match ctx.options.bucket {
        BucketChoice::Create => true,
        BucketChoice::Skip => false,
        BucketChoice::Ask => match ctx
            .prompter
            .confirm("Do you want to set up an R2 bucket for storage?", false)
        {
            Ok(answer) => answer,
            Err(e) => return e.into(),
        },
    };
    if !wanted {
        println!("  R2 bucket setup skipped");
        return StepResult::Success;
    }

    let mut doc = match ctx.load_document() {
        Ok(doc) => doc,
        Err(e) => return e.into(),
    };

    let base = ctx
        .state
        .app_name
        .clone()
        .unwrap_or_else(|| ctx.project_name());
    let default_name = format!("{base}-bucket");
    let name = match ctx.prompter.text("Name for your R2 bucket", &default_name) {
        Ok(name) => name,
        Err(e) => return e.into(),
    };

    // R2 names are global; a bucket we can neither create nor see may
    // still be usable, so the binding is written either way.
    let warning = match provision::provision_bucket(ctx.runner, ctx.format, &ctx.wrangler, &name) {
        Ok(resource) => {
            report_resource("R2 bucket", &resource);
            None
        }
        Err(failure) => {
            let output = failure.combined_output();
            if !output.is_empty() {
                println!("{output}");
            }
            Some(format!(
                "R2 bucket '{name}' could not be created or found; binding written anyway. \
                 Check the bucket in the Cloudflare dashboard."
            ))
        }
    };

    let binding = R2Binding {
        binding: ctx.config.bucket.binding.clone(),
        bucket_name: name.clone(),
    };
    if let Err(e) = doc.upsert_binding(&binding) {
        return SetupError::persistence(e).into();
    }
    if let Err(e) = ctx.store_document(&doc) {
        return e.into();
    }
    println!(
        "  {} Binding {} written to {}",
        "✓".green(),
        binding.binding,
        ctx.config.wrangler.config_file
    );
    ctx.state.bucket_name = Some(name);

    match warning {
        Some(message) => StepResult::SuccessWithWarning(message),
        None => StepResult::Success,
    }
}

fn report_resource(label: &str, resource: &ProvisionedResource) {
    let verb = match resource.source {
        Source::Created => "created",
        Source::Discovered => "already exists",
    };
    println!(
        "  {} {} '{}' {} ({})",
        "✓".green(),
        label,
        resource.name,
        verb,
        resource.identifier
    );
}
