//! Worker identity and compatibility keys

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::ConfigDocument;

/// Pages-only key that has no meaning for a worker deployment.
const PAGES_OUTPUT_DIR_KEY: &str = "pages_build_output_dir";

/// Values written into the worker section of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerSettings {
    pub main: String,
    pub compatibility_date: String,
    pub compatibility_flags: Vec<String>,
    pub assets_binding: String,
    pub assets_directory: String,
    pub placement_mode: String,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            main: ".open-next/worker.js".to_string(),
            compatibility_date: "2025-03-25".to_string(),
            compatibility_flags: vec!["nodejs_compat".to_string()],
            assets_binding: "ASSETS".to_string(),
            assets_directory: ".open-next/assets".to_string(),
            placement_mode: "smart".to_string(),
        }
    }
}

/// What [`apply_worker_settings`] changed beyond the unconditional keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerSettingsReport {
    pub removed_pages_output_dir: bool,
    pub added_placement: bool,
}

/// Write name, entry point, compatibility, assets and placement.
///
/// `assets` is always overwritten; `placement` is only added when absent.
pub fn apply_worker_settings(
    doc: &mut ConfigDocument,
    settings: &WorkerSettings,
    app_name: &str,
) -> WorkerSettingsReport {
    let mut report = WorkerSettingsReport::default();

    doc.set("name", app_name);
    doc.set("main", settings.main.as_str());
    doc.set("compatibility_date", settings.compatibility_date.as_str());
    doc.set(
        "compatibility_flags",
        Value::Array(
            settings
                .compatibility_flags
                .iter()
                .map(|f| Value::from(f.as_str()))
                .collect(),
        ),
    );

    report.removed_pages_output_dir = doc.remove(PAGES_OUTPUT_DIR_KEY).is_some();

    let mut assets = Table::new();
    assets.insert("binding".to_string(), Value::from(settings.assets_binding.as_str()));
    assets.insert(
        "directory".to_string(),
        Value::from(settings.assets_directory.as_str()),
    );
    doc.set("assets", Value::Table(assets));

    if !doc.contains_key("placement") {
        let mut placement = Table::new();
        placement.insert("mode".to_string(), Value::from(settings.placement_mode.as_str()));
        doc.set("placement", Value::Table(placement));
        report.added_placement = true;
    }

    report
}
