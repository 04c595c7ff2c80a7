//! Blank-line script splitter.
//!
//! Upgrade scripts separate statements with an empty (or whitespace-only)
//! line. This is a textual convention rather than a SQL parser: a statement
//! that itself contains a blank line is split in two, so script authors must
//! keep statement bodies free of blank lines.

use regex::Regex;
use std::sync::OnceLock;

static STATEMENT_SEPARATOR: OnceLock<Regex> = OnceLock::new();
static LINE_COMMENT: OnceLock<Regex> = OnceLock::new();

fn statement_separator() -> &'static Regex {
    STATEMENT_SEPARATOR.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid regex"))
}

fn line_comment() -> &'static Regex {
    LINE_COMMENT.get_or_init(|| Regex::new(r"--[^\r\n]*").expect("valid regex"))
}

/// Split raw script text into executable statements.
///
/// Each chunk is trimmed, stripped of `--` comments, whitespace-normalized
/// and loses one trailing `;`. Chunks that are blank, or hold nothing but
/// comments, are skipped.
///
/// # Examples
/// ```
/// use sl_core::split_statements;
/// assert_eq!(split_statements("A;\n\nB;\n"), vec!["A", "B"]);
/// assert_eq!(split_statements("X -- comment\n\nY;"), vec!["X", "Y"]);
/// ```
pub fn split_statements(script: &str) -> Vec<String> {
    statement_separator()
        .split(script)
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            let without_comments = line_comment().replace_all(chunk.trim(), "");
            let normalized = normalize_space(&without_comments);
            match normalized.strip_suffix(';') {
                Some(stripped) => stripped.to_string(),
                None => normalized,
            }
        })
        .filter(|statement| !statement.is_empty())
        .collect()
}

/// Trim and collapse every whitespace run to a single space.
fn normalize_space(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
