//! Setup settings (`worker-setup.toml`)
//!
//! Every section is optional; a missing file means all defaults.
//!
//! ```toml
//! [wrangler]
//! command = ["npx", "wrangler"]
//!
//! [database]
//! binding = "DB"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::wrangler::WorkerSettings;

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "worker-setup.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub wrangler: WranglerSection,
    pub worker: WorkerSettings,
    pub database: DatabaseSection,
    pub bucket: BucketSection,
    pub dependencies: DependenciesSection,
    pub migrations: MigrationsSection,
    pub env_file: EnvFileSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WranglerSection {
    /// Argv prefix used to invoke wrangler
    pub command: Vec<String>,
    /// Config document, relative to the project root
    pub config_file: String,
}

impl Default for WranglerSection {
    fn default() -> Self {
        Self {
            command: vec!["bunx".to_string(), "wrangler".to_string()],
            config_file: "wrangler.toml".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub binding: String,
    pub migrations_dir: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            binding: "DATABASE".to_string(),
            migrations_dir: "./drizzle".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketSection {
    pub binding: String,
}

impl Default for BucketSection {
    fn default() -> Self {
        Self {
            binding: "MY_BUCKET".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependenciesSection {
    pub install: Vec<String>,
}

impl Default for DependenciesSection {
    fn default() -> Self {
        Self {
            install: ["bun", "add", "@opennextjs/cloudflare@latest"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationsSection {
    pub generate: Vec<String>,
}

impl Default for MigrationsSection {
    fn default() -> Self {
        Self {
            generate: ["bunx", "drizzle-kit", "generate"].map(String::from).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvFileSection {
    pub path: String,
}

impl Default for EnvFileSection {
    fn default() -> Self {
        Self {
            path: ".dev.vars".to_string(),
        }
    }
}

impl SetupConfig {
    /// Load `worker-setup.toml` from the project root, or defaults.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read setup config: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse setup config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SetupConfig::default();
        assert_eq!(config.wrangler.command, vec!["bunx", "wrangler"]);
        assert_eq!(config.wrangler.config_file, "wrangler.toml");
        assert_eq!(config.database.binding, "DATABASE");
        assert_eq!(config.bucket.binding, "MY_BUCKET");
        assert_eq!(config.env_file.path, ".dev.vars");
        assert_eq!(config.worker.compatibility_flags, vec!["nodejs_compat"]);
    }

    #[test]
    fn test_load_missing_returns_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(SetupConfig::load(tmp.path()).unwrap(), SetupConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[wrangler]\ncommand = [\"npx\", \"wrangler\"]\n\n[worker]\ncompatibility_date = \"2025-06-01\"\n",
        )
        .unwrap();

        let config = SetupConfig::load(tmp.path()).unwrap();
        assert_eq!(config.wrangler.command, vec!["npx", "wrangler"]);
        // Unset fields in a present section keep defaults
        assert_eq!(config.wrangler.config_file, "wrangler.toml");
        assert_eq!(config.worker.compatibility_date, "2025-06-01");
        assert_eq!(config.worker.main, ".open-next/worker.js");
        assert_eq!(config.database, DatabaseSection::default());
    }

    #[test]
    fn test_load_invalid_config_fails() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[wrangler\n").unwrap();
        assert!(SetupConfig::load(tmp.path()).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = SetupConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[wrangler]"));
        assert!(toml_str.contains("[database]"));
        let parsed: SetupConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
