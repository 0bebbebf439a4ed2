//! Where setup reads and writes, relative to the project root.
//!
//! No I/O here; one file shows the whole layout.
//!
//! ```text
//! project/
//! ├── worker-setup.toml     # Setup settings (optional)
//! ├── wrangler.toml         # Config document (name configurable)
//! ├── .dev.vars             # Local secrets (name configurable)
//! └── open-next.config.ts   # Created once, never overwritten
//! ```

use std::path::{Path, PathBuf};

use crate::config::SetupConfig;

pub const OPEN_NEXT_CONFIG: &str = "open-next.config.ts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub wrangler_toml: PathBuf,
    pub env_file: PathBuf,
    pub open_next_config: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: &Path, config: &SetupConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            wrangler_toml: root.join(&config.wrangler.config_file),
            env_file: root.join(&config.env_file.path),
            open_next_config: root.join(OPEN_NEXT_CONFIG),
        }
    }

    /// Directory name of the project root, used for default resource names.
    pub fn project_name(&self) -> String {
        self.root
            .canonicalize()
            .ok()
            .as_deref()
            .unwrap_or(self.root.as_path())
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_follows_config() {
        let mut config = SetupConfig::default();
        config.env_file.path = ".env.local".to_string();
        let paths = ProjectPaths::new(Path::new("/work/shop"), &config);
        assert_eq!(paths.wrangler_toml, Path::new("/work/shop/wrangler.toml"));
        assert_eq!(paths.env_file, Path::new("/work/shop/.env.local"));
        assert_eq!(
            paths.open_next_config,
            Path::new("/work/shop/open-next.config.ts")
        );
    }

    #[test]
    fn test_project_name_from_dir() {
        let paths = ProjectPaths::new(Path::new("/nonexistent/shop"), &SetupConfig::default());
        assert_eq!(paths.project_name(), "shop");
    }
}
