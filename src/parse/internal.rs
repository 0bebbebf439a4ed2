//! Pattern matching over wrangler output

use regex::Regex;
use std::sync::OnceLock;

use super::AccountIdentity;

/// Vertical border glyph used by wrangler tables.
const BORDER: char = '│';

/// 32-char lowercase hex account id as a whole word.
fn account_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-f0-9]{32}\b").expect("Invalid account id regex"))
}

/// `database_id = "..."` as printed in the TOML snippet after `d1 create`.
fn database_id_assignment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"database_id\s*=\s*"([^"]+)""#).expect("Invalid database_id regex")
    })
}

/// A UUID sitting between table borders, as printed by `d1 info`.
fn table_uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)│\s*([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})\s*│",
        )
        .expect("Invalid table uuid regex")
    })
}

/// Parse one `│ name │ id │` row.
///
/// Rows must start and end with a border and contain exactly one account
/// id; header and separator rows fail that test and are skipped.
pub(super) fn parse_account_line(line: &str) -> Option<AccountIdentity> {
    let trimmed = line.trim();
    if !trimmed.starts_with(BORDER) || !trimmed.ends_with(BORDER) {
        return None;
    }

    let mut matches = account_id_regex().find_iter(trimmed);
    let id = matches.next()?;
    if matches.next().is_some() {
        return None;
    }

    let display_name = trimmed[..id.start()]
        .trim()
        .trim_matches(BORDER)
        .trim()
        .to_string();

    Some(AccountIdentity {
        display_name,
        account_id: id.as_str().to_string(),
    })
}

/// First matching identifier pattern wins; candidates are never merged.
pub(super) fn extract_database_id(output: &str) -> Option<String> {
    database_id_assignment_regex()
        .captures(output)
        .or_else(|| table_uuid_regex().captures(output))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The bucket name when the output refers to it as a whole word.
pub(super) fn extract_bucket_name(output: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let pattern = format!(r"(^|[^\w-]){}($|[^\w-])", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    re.is_match(output).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_line() {
        let account =
            parse_account_line("│ my-account │ 0123456789abcdef0123456789abcdef │").unwrap();
        assert_eq!(account.display_name, "my-account");
        assert_eq!(account.account_id, "0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn test_account_line_with_padding() {
        let account = parse_account_line(
            "   │ Acme Corp's Account    │ abcdefabcdefabcdefabcdefabcdefab │  ",
        )
        .unwrap();
        assert_eq!(account.display_name, "Acme Corp's Account");
    }

    #[test]
    fn test_two_ids_on_one_line_rejected() {
        let line = "│ 0123456789abcdef0123456789abcdef │ fedcba9876543210fedcba9876543210 │";
        assert!(parse_account_line(line).is_none());
    }

    #[test]
    fn test_header_and_separator_rejected() {
        assert!(parse_account_line("│ Account Name │ Account ID │").is_none());
        assert!(parse_account_line("├──────┼──────┤").is_none());
        assert!(parse_account_line("┌──────┬──────┐").is_none());
    }

    #[test]
    fn test_line_without_borders_rejected() {
        assert!(parse_account_line("Personal 0123456789abcdef0123456789abcdef").is_none());
    }

    #[test]
    fn test_uppercase_or_short_ids_rejected() {
        assert!(parse_account_line("│ x │ 0123456789ABCDEF0123456789ABCDEF │").is_none());
        assert!(parse_account_line("│ x │ 0123456789abcdef │").is_none());
        // 33 hex chars is not a whole-word 32-char token
        assert!(parse_account_line("│ x │ 0123456789abcdef0123456789abcdef0 │").is_none());
    }

    #[test]
    fn test_database_id_from_create_output() {
        let output = r#"
✅ Successfully created DB 'app-db' in region WEUR

[[d1_databases]]
binding = "DB"
database_name = "app-db"
database_id = "1b2c3d4e-1111-2222-3333-444455556666"
"#;
        assert_eq!(
            extract_database_id(output).as_deref(),
            Some("1b2c3d4e-1111-2222-3333-444455556666")
        );
    }

    #[test]
    fn test_database_id_from_info_table() {
        let output = "\
┌───────────────────┬──────────────────────────────────────┐
│ DB                │ A1B2C3D4-1111-2222-3333-444455556666 │
├───────────────────┼──────────────────────────────────────┤
│ name              │ app-db                               │
└───────────────────┴──────────────────────────────────────┘
";
        assert_eq!(
            extract_database_id(output).as_deref(),
            Some("A1B2C3D4-1111-2222-3333-444455556666")
        );
    }

    #[test]
    fn test_assignment_wins_over_table() {
        let output = "database_id = \"from-assignment\"\n│ 1b2c3d4e-1111-2222-3333-444455556666 │";
        assert_eq!(extract_database_id(output).as_deref(), Some("from-assignment"));
    }

    #[test]
    fn test_no_database_id() {
        assert!(extract_database_id("✘ [ERROR] A database with that name already exists").is_none());
        assert!(extract_database_id("│ not-a-uuid │").is_none());
    }

    #[test]
    fn test_bucket_name_whole_word() {
        let output = "name:          app-bucket\ncreated:       2025-01-01";
        assert_eq!(
            extract_bucket_name(output, "app-bucket").as_deref(),
            Some("app-bucket")
        );
        assert!(extract_bucket_name(output, "app").is_none());
        assert!(extract_bucket_name(output, "").is_none());
    }
}
