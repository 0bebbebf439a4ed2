//! In-memory wrangler.toml with explicit persistence

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use toml::{Table, Value};

use super::bindings::{reconcile, Binding};

/// An ordered TOML document.
///
/// Mutations only touch memory; [`ConfigDocument::store`] is a separate,
/// explicit step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    table: Table,
}

impl ConfigDocument {
    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = toml::from_str(contents)?;
        Ok(Self { table })
    }

    /// Serialize and write the document to disk.
    pub fn store(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml_string()?;
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&self.table).context("Failed to serialize config document")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.table.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.table.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Set a top-level key. An existing key keeps its position.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.table.insert(key.to_string(), value.into());
    }

    /// Remove a top-level key, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.table.get(key).cloned()?;
        self.table = std::mem::take(&mut self.table)
            .into_iter()
            .filter(|(k, _)| k != key)
            .collect();
        Some(removed)
    }

    /// Entries of a list-valued key. A missing or non-list value reads as
    /// an empty list.
    pub fn bindings(&self, list_key: &str) -> Vec<Value> {
        match self.table.get(list_key) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn set_bindings(&mut self, list_key: &str, items: Vec<Value>) {
        self.set(list_key, Value::Array(items));
    }

    /// Replace any binding with the same logical name and append this one.
    pub fn upsert_binding<B: Binding>(&mut self, binding: &B) -> Result<()> {
        let table = binding.to_table()?;
        let merged = reconcile(self.bindings(B::LIST_KEY), table);
        self.set_bindings(B::LIST_KEY, merged);
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}
