use anyhow::{Context, Result};

use worker_setup::config::{SetupConfig, CONFIG_FILE};

pub fn execute(json: bool) -> Result<()> {
    let root = std::env::current_dir().context("Failed to read current directory")?;
    let config = SetupConfig::load(&root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        let source = root.join(CONFIG_FILE);
        if source.exists() {
            println!("# {}", source.display());
        } else {
            println!("# defaults ({CONFIG_FILE} not found)");
        }
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}
