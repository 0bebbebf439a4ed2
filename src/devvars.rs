//! Append-only `KEY=value` env file (`.dev.vars`)
//!
//! A key counts as present when `KEY=` appears anywhere in the file. Present
//! keys are never rewritten, even if the value differs.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents; a missing file reads as empty.
    pub fn read(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(has_key(&self.read()?, key))
    }

    /// Append each pair whose key is absent and whose value is non-empty.
    /// Returns the keys written.
    pub fn append_missing(&self, pairs: &[(&str, &str)]) -> Result<Vec<String>> {
        let existing = self.read()?;
        let mut block = String::new();
        let mut written = Vec::new();

        for (key, value) in pairs {
            if value.is_empty() || has_key(&existing, key) || written.iter().any(|k| k == key) {
                continue;
            }
            block.push_str(&format!("{key}={value}\n"));
            written.push(key.to_string());
        }

        if block.is_empty() {
            return Ok(written);
        }
        if !existing.is_empty() && !existing.ends_with('\n') {
            block.insert(0, '\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(block.as_bytes())
            .with_context(|| format!("Failed to append to {}", self.path.display()))?;

        Ok(written)
    }
}

fn has_key(contents: &str, key: &str) -> bool {
    contents.contains(&format!("{key}="))
}
