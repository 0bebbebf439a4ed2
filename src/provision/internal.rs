//! Create-then-discover state machine

use colored::Colorize;
use tracing::{debug, info};

use super::{ProvisionFailure, ProvisionedResource, ResourceKind, Source};
use crate::parse::OutputFormat;
use crate::runner::CommandRunner;

/// Create the named resource, falling back to describing an existing one.
pub fn provision(
    runner: &dyn CommandRunner,
    format: &dyn OutputFormat,
    kind: &dyn ResourceKind,
    name: &str,
) -> Result<ProvisionedResource, ProvisionFailure> {
    let created = runner.run(&kind.create_command(name));
    if let Some(identifier) = kind.created_identifier(format, name, &created) {
        info!(kind = kind.label(), resource = name, %identifier, "resource created");
        return Ok(ProvisionedResource {
            name: name.to_string(),
            identifier,
            source: Source::Created,
        });
    }

    debug!(
        kind = kind.label(),
        resource = name,
        create_ok = created.is_ok(),
        "no identifier from create; trying describe"
    );
    println!(
        "{}",
        format!(
            "  Creating {} '{}' did not return an identifier (it may already exist). Looking it up...",
            kind.label(),
            name
        )
        .yellow()
    );

    let described = runner.run(&kind.describe_command(name));
    if let Some(identifier) = kind.discovered_identifier(format, name, &described) {
        info!(kind = kind.label(), resource = name, %identifier, "existing resource discovered");
        return Ok(ProvisionedResource {
            name: name.to_string(),
            identifier,
            source: Source::Discovered,
        });
    }

    Err(ProvisionFailure {
        name: name.to_string(),
        create_output: created.text().to_string(),
        describe_output: described.text().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::parse::WranglerFormat;
    use crate::provision::{provision_bucket, provision_database, Source, WranglerCli};
    use crate::runner::fake::ScriptedRunner;

    const UUID: &str = "1b2c3d4e-1111-2222-3333-444455556666";

    fn cli() -> WranglerCli {
        WranglerCli::new(vec!["wrangler".to_string()])
    }

    #[test]
    fn test_database_created() {
        let runner = ScriptedRunner::new().ok(
            "wrangler d1 create app-db",
            &format!("[[d1_databases]]\ndatabase_id = \"{UUID}\"\n"),
        );
        let res = provision_database(&runner, &WranglerFormat, &cli(), "app-db").unwrap();
        assert_eq!(res.identifier, UUID);
        assert_eq!(res.source, Source::Created);
        assert_eq!(runner.lines(), vec!["wrangler d1 create app-db"]);
    }

    #[test]
    fn test_database_discovered_after_conflict() {
        let runner = ScriptedRunner::new()
            .err(
                "wrangler d1 create app-db",
                "✘ [ERROR] A database with that name already exists",
            )
            .ok(
                "wrangler d1 info app-db",
                &format!("┌────┬────┐\n│ DB │ {UUID} │\n└────┴────┘\n"),
            );
        let res = provision_database(&runner, &WranglerFormat, &cli(), "app-db").unwrap();
        assert_eq!(res.identifier, UUID);
        assert_eq!(res.source, Source::Discovered);
        assert_eq!(
            runner.lines(),
            vec!["wrangler d1 create app-db", "wrangler d1 info app-db"]
        );
    }

    #[test]
    fn test_created_without_identifier_falls_back() {
        let runner = ScriptedRunner::new()
            .ok("wrangler d1 create app-db", "Created, see dashboard")
            .ok("wrangler d1 info app-db", &format!("│ {UUID} │"));
        let res = provision_database(&runner, &WranglerFormat, &cli(), "app-db").unwrap();
        assert_eq!(res.source, Source::Discovered);
    }

    #[test]
    fn test_database_fatal_when_both_fail() {
        let runner = ScriptedRunner::new()
            .err("wrangler d1 create app-db", "create exploded")
            .err("wrangler d1 info app-db", "not found");
        let failure = provision_database(&runner, &WranglerFormat, &cli(), "app-db").unwrap_err();
        assert_eq!(failure.name, "app-db");
        assert_eq!(failure.combined_output(), "create exploded\nnot found");
    }

    #[test]
    fn test_failed_describe_output_is_not_parsed() {
        // An error message that happens to contain a UUID is not a discovery
        let runner = ScriptedRunner::new()
            .err("wrangler d1 create app-db", "boom")
            .err("wrangler d1 info app-db", &format!("│ {UUID} │"));
        assert!(provision_database(&runner, &WranglerFormat, &cli(), "app-db").is_err());
    }

    #[test]
    fn test_bucket_created_uses_name() {
        let runner = ScriptedRunner::new().ok("wrangler r2 bucket create media", "Created bucket");
        let res = provision_bucket(&runner, &WranglerFormat, &cli(), "media").unwrap();
        assert_eq!(res.identifier, "media");
        assert_eq!(res.source, Source::Created);
    }

    #[test]
    fn test_bucket_discovered() {
        let runner = ScriptedRunner::new()
            .err("wrangler r2 bucket create media", "bucket already exists")
            .ok("wrangler r2 bucket info media", "name:  media\nlocation: WEUR\n");
        let res = provision_bucket(&runner, &WranglerFormat, &cli(), "media").unwrap();
        assert_eq!(res.source, Source::Discovered);
    }

    #[test]
    fn test_bucket_fails_when_both_fail() {
        let runner = ScriptedRunner::new()
            .err("wrangler r2 bucket create media", "name taken globally")
            .err("wrangler r2 bucket info media", "not authorized");
        assert!(provision_bucket(&runner, &WranglerFormat, &cli(), "media").is_err());
    }
}
