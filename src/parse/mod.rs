//! Output parser - recover identifiers from wrangler's text output
//!
//! Wrangler prints human-oriented tables and TOML snippets, not a stable
//! machine format. Everything that depends on that shape sits behind
//! [`OutputFormat`], so a different tool version can get its own adapter
//! without touching the provisioner or the orchestrator.
//!
//! Parsers never fail: a missing match is `None` / an empty list, and the
//! caller decides whether that is fatal or worth a retry.
//!
//! # Known fragility
//!
//! [`WranglerFormat`] matches the box-drawing tables (`│ name │ id │`) and
//! `database_id = "..."` lines printed by current wrangler releases. If the
//! output shape changes, parsing reports nothing found rather than
//! guessing.

mod internal;

use serde::Serialize;

/// One account row from the account listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountIdentity {
    pub display_name: String,
    pub account_id: String,
}

/// Adapter for one tool's textual output shape.
pub trait OutputFormat {
    /// All account rows in an account listing.
    fn accounts(&self, output: &str) -> Vec<AccountIdentity>;

    /// Whether the listing says the login has account access at all, even
    /// if no rows could be parsed.
    fn mentions_account(&self, output: &str) -> bool;

    /// Database identifier from create or describe output.
    fn database_id(&self, output: &str) -> Option<String>;

    /// Bucket name, if the output describes the named bucket.
    fn bucket_name(&self, output: &str, name: &str) -> Option<String>;
}

/// Output shapes printed by wrangler 3.x/4.x.
#[derive(Debug, Clone, Copy, Default)]
pub struct WranglerFormat;

impl OutputFormat for WranglerFormat {
    fn accounts(&self, output: &str) -> Vec<AccountIdentity> {
        output.lines().filter_map(internal::parse_account_line).collect()
    }

    fn mentions_account(&self, output: &str) -> bool {
        output.contains("associated with an account")
    }

    fn database_id(&self, output: &str) -> Option<String> {
        internal::extract_database_id(output)
    }

    fn bucket_name(&self, output: &str, name: &str) -> Option<String> {
        internal::extract_bucket_name(output, name)
    }
}

/// Parse a single table line into an account, using wrangler's shape.
pub fn parse_account_line(line: &str) -> Option<AccountIdentity> {
    internal::parse_account_line(line)
}
