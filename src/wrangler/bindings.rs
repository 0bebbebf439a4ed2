//! Named binding entries and their reconciliation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

/// Field holding a binding's logical name.
pub const BINDING_KEY: &str = "binding";

/// A typed entry in one of the document's binding lists.
pub trait Binding: Serialize {
    /// Top-level key of the list this binding lives in.
    const LIST_KEY: &'static str;

    fn logical_name(&self) -> &str;

    fn to_table(&self) -> Result<Table> {
        match Value::try_from(self)
            .with_context(|| format!("Failed to encode {} binding", self.logical_name()))?
        {
            Value::Table(table) => Ok(table),
            other => anyhow::bail!(
                "Binding {} encoded as {} instead of a table",
                self.logical_name(),
                other.type_str()
            ),
        }
    }
}

/// `[[d1_databases]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct D1Binding {
    pub binding: String,
    pub database_name: String,
    pub database_id: String,
    pub migrations_dir: String,
}

impl Binding for D1Binding {
    const LIST_KEY: &'static str = "d1_databases";

    fn logical_name(&self) -> &str {
        &self.binding
    }
}

/// `[[r2_buckets]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct R2Binding {
    pub binding: String,
    pub bucket_name: String,
}

impl Binding for R2Binding {
    const LIST_KEY: &'static str = "r2_buckets";

    fn logical_name(&self) -> &str {
        &self.binding
    }
}

/// Logical name of a list entry, if it has one.
pub fn logical_name(entry: &Value) -> Option<&str> {
    entry.get(BINDING_KEY).and_then(Value::as_str)
}

/// Drop every entry sharing the new binding's logical name, then append it.
///
/// The replaced binding moves to the end; the other entries keep their
/// relative order. Entries without a logical name are kept as-is.
pub fn reconcile(existing: Vec<Value>, binding: Table) -> Vec<Value> {
    let name = binding
        .get(BINDING_KEY)
        .and_then(Value::as_str)
        .map(str::to_owned);

    let mut merged: Vec<Value> = existing
        .into_iter()
        .filter(|entry| name.is_none() || logical_name(entry) != name.as_deref())
        .collect();
    merged.push(Value::Table(binding));
    merged
}
