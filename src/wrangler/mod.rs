//! Wrangler config document - load, mutate, store
//!
//! Manages the project's `wrangler.toml`: the worker identity and
//! compatibility settings plus the `d1_databases` / `r2_buckets` binding
//! lists. Keys the setup does not touch survive a load/store cycle with
//! their values and relative order intact.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use worker_setup::wrangler::{ConfigDocument, D1Binding};
//!
//! let path = Path::new("wrangler.toml");
//! let mut doc = ConfigDocument::load(path)?;
//! doc.upsert_binding(&D1Binding {
//!     binding: "DATABASE".to_string(),
//!     database_name: "app-db".to_string(),
//!     database_id: "1b2c3d4e-1111-2222-3333-444455556666".to_string(),
//!     migrations_dir: "./drizzle".to_string(),
//! })?;
//! doc.store(path)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod bindings;
mod document;
mod worker;

pub use bindings::{logical_name, reconcile, Binding, D1Binding, R2Binding, BINDING_KEY};
pub use document::ConfigDocument;
pub use worker::{apply_worker_settings, WorkerSettings, WorkerSettingsReport};
