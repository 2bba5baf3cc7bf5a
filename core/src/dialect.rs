//! SQL dialects and the places where their syntax diverges.

use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};

use crate::{SQL, error::GridError};

/// SQL dialect for database-specific rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// SQLite - uses `?` positional placeholders
    #[default]
    SQLite,

    /// PostgreSQL - uses `$1, $2, ...` numbered placeholders
    #[serde(alias = "postgres", alias = "pg")]
    PostgreSQL,

    /// MySQL - uses `?` positional placeholders and backtick identifiers
    MySQL,
}

impl Dialect {
    pub const ALL: &'static [&'static str] = &["sqlite", "postgresql", "mysql"];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Dialect::SQLite => "sqlite",
            Dialect::PostgreSQL => "postgresql",
            Dialect::MySQL => "mysql",
        }
    }

    /// Returns `true` if this dialect uses numbered placeholders (`$1, $2, ...`)
    #[inline]
    #[must_use]
    pub const fn uses_numbered_placeholders(self) -> bool {
        matches!(self, Dialect::PostgreSQL)
    }

    /// Renders a placeholder for this dialect with the given 1-based index.
    ///
    /// Returns `Cow::Borrowed("?")` for SQLite/MySQL (zero allocation),
    /// `Cow::Owned` for PostgreSQL numbered placeholders.
    #[inline]
    pub fn render_placeholder(self, index: usize) -> Cow<'static, str> {
        match self {
            Dialect::PostgreSQL => Cow::Owned(format!("${index}")),
            Dialect::SQLite | Dialect::MySQL => Cow::Borrowed("?"),
        }
    }

    #[inline]
    pub const fn identifier_quote(self) -> char {
        match self {
            Dialect::MySQL => '`',
            Dialect::SQLite | Dialect::PostgreSQL => '"',
        }
    }

    /// Writes `ident` quoted for this dialect, doubling embedded quote characters.
    pub fn quote_identifier(self, buf: &mut String, ident: &str) {
        let quote = self.identifier_quote();
        buf.push(quote);
        for ch in ident.chars() {
            if ch == quote {
                buf.push(quote);
            }
            buf.push(ch);
        }
        buf.push(quote);
    }

    /// Case-insensitive `LIKE` of `expr` against an already-escaped pattern.
    pub fn like_ci(self, expr: SQL, pattern: SQL) -> SQL {
        let matched = match self {
            Dialect::PostgreSQL => expr.append_raw("ILIKE").append(pattern),
            Dialect::SQLite | Dialect::MySQL => SQL::raw("LOWER(")
                .append(expr)
                .append_raw(") LIKE LOWER(")
                .append(pattern)
                .append_raw(")"),
        };
        matched.append_raw(self.like_escape_clause())
    }

    /// `ESCAPE` clause matching [`escape_like`](crate::expressions::conditions::escape_like).
    pub const fn like_escape_clause(self) -> &'static str {
        match self {
            // MySQL treats backslash as an escape inside string literals
            Dialect::MySQL => r"ESCAPE '\\'",
            Dialect::SQLite | Dialect::PostgreSQL => r"ESCAPE '\'",
        }
    }

    /// The date portion of a date/time expression, as `YYYY-MM-DD` text.
    pub fn date_text(self, expr: SQL) -> SQL {
        match self {
            Dialect::SQLite => SQL::raw("date(").append(expr).append_raw(")"),
            Dialect::PostgreSQL => SQL::raw("CAST(CAST(")
                .append(expr)
                .append_raw("AS DATE) AS TEXT)"),
            Dialect::MySQL => SQL::raw("CAST(CAST(")
                .append(expr)
                .append_raw("AS DATE) AS CHAR)"),
        }
    }

    /// The `LIMIT` needed in front of a bare `OFFSET`, if the dialect requires one.
    pub const fn unbounded_limit(self) -> Option<&'static str> {
        match self {
            Dialect::SQLite => Some("LIMIT -1"),
            Dialect::MySQL => Some("LIMIT 18446744073709551615"),
            Dialect::PostgreSQL => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = GridError;

    /// Parse a dialect from a string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Dialect::SQLite),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSQL),
            "mysql" => Ok(Dialect::MySQL),
            other => Err(GridError::configuration(format!(
                "unknown dialect '{other}', expected one of {}",
                Dialect::ALL.join(", ")
            ))),
        }
    }
}
