use anyhow::{Context, Result};
use colored::Colorize;

use worker_setup::config::SetupConfig;
use worker_setup::parse::{OutputFormat, WranglerFormat};
use worker_setup::provision::WranglerCli;
use worker_setup::runner::{CommandOutcome, CommandRunner, SystemRunner};

pub fn execute(json: bool) -> Result<i32> {
    let root = std::env::current_dir().context("Failed to read current directory")?;
    let config = SetupConfig::load(&root)?;

    let whoami = WranglerCli::new(config.wrangler.command.clone())
        .with_config_file(&config.wrangler.config_file)
        .in_dir(&root)
        .command(["whoami"]);
    let output = match SystemRunner::quiet().run(&whoami) {
        CommandOutcome::Ok(output) => output,
        CommandOutcome::Err(message) => {
            eprintln!("{} {} failed", "✗".red(), whoami);
            eprintln!("{message}");
            return Ok(1);
        }
    };

    let accounts = WranglerFormat.accounts(&output);
    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(0);
    }

    if accounts.is_empty() {
        println!("{}", "No accounts found in the account listing.".yellow());
        return Ok(1);
    }
    for account in &accounts {
        println!("  {}  {}", account.account_id, account.display_name);
    }
    Ok(0)
}
