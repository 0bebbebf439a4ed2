pub mod config;
pub mod devvars;
pub mod error;
pub mod logging;
pub mod parse;
pub mod paths;
pub mod prompt;
pub mod provision;
pub mod runner;
pub mod secret;
pub mod setup;
pub mod wrangler;

// Re-export commonly used types
pub use config::SetupConfig;
pub use error::SetupError;
pub use setup::{SetupFailure, SetupReport};
