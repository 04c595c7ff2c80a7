//! SQL identifier utilities
//!
//! The version table name is spliced into DDL and DML unquoted (quoting
//! would defeat the case-folding the engine relies on), so it is validated
//! up front instead.

/// Check that `ident` is a plain, unquoted SQL identifier.
///
/// Accepts ASCII letters, digits and `_`, not starting with a digit.
///
/// # Examples
/// ```
/// use sl_core::sql_utils::is_plain_identifier;
/// assert!(is_plain_identifier("schema_version"));
/// assert!(!is_plain_identifier("1version"));
/// assert!(!is_plain_identifier("version; DROP TABLE x"));
/// ```
pub fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check a table name that may carry a single schema prefix (`schema.table`).
///
/// # Examples
/// ```
/// use sl_core::sql_utils::is_valid_table_name;
/// assert!(is_valid_table_name("app.schema_version"));
/// assert!(!is_valid_table_name("a.b.c"));
/// ```
pub fn is_valid_table_name(name: &str) -> bool {
    match split_qualified_name(name) {
        (Some(schema), table) => is_plain_identifier(schema) && is_plain_identifier(table),
        (None, table) => is_plain_identifier(table),
    }
}

/// Split a potentially schema-qualified table name into (schema, table).
///
/// Uses the last `.` as the separator; an unqualified name has no schema.
///
/// # Examples
/// ```
/// use sl_core::sql_utils::split_qualified_name;
/// assert_eq!(split_qualified_name("schema_version"), (None, "schema_version"));
/// assert_eq!(split_qualified_name("app.schema_version"), (Some("app"), "schema_version"));
/// ```
pub fn split_qualified_name(name: &str) -> (Option<&str>, &str) {
    match name.rfind('.') {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifier() {
        assert!(is_plain_identifier("schema_version"));
        assert!(is_plain_identifier("SCHEMA_VERSION"));
        assert!(is_plain_identifier("_v2"));
    }

    #[test]
    fn test_plain_identifier_rejects() {
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("9lives"));
        assert!(!is_plain_identifier("schema-version"));
        assert!(!is_plain_identifier("\"quoted\""));
        assert!(!is_plain_identifier("app.schema_version"));
    }

    #[test]
    fn test_valid_table_name() {
        assert!(is_valid_table_name("schema_version"));
        assert!(is_valid_table_name("app.schema_version"));
        assert!(!is_valid_table_name(".schema_version"));
        assert!(!is_valid_table_name("app."));
        assert!(!is_valid_table_name("a.b.c"));
    }

    #[test]
    fn test_split_qualified_name() {
        assert_eq!(split_qualified_name("t"), (None, "t"));
        assert_eq!(split_qualified_name("s.t"), (Some("s"), "t"));
    }
}
