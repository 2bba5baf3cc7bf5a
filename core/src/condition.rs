//! Predicate construction per attribute kind and match mode.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    Dialect, SQL,
    error::GridError,
    expressions::conditions::{contains, ends_with, eq, neq, not, starts_with},
    resolver::ResolvedAttribute,
    schema::ValueKind,
};

/// Comparison applied between a filter value and an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    #[default]
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    NotContains,
    NotEquals,
}

impl MatchMode {
    pub const ALL: &'static [&'static str] = &[
        "contains",
        "equals",
        "startsWith",
        "endsWith",
        "notContains",
        "notEquals",
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            MatchMode::Contains => "contains",
            MatchMode::Equals => "equals",
            MatchMode::StartsWith => "startsWith",
            MatchMode::EndsWith => "endsWith",
            MatchMode::NotContains => "notContains",
            MatchMode::NotEquals => "notEquals",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contains" => Ok(MatchMode::Contains),
            "equals" => Ok(MatchMode::Equals),
            "startsWith" => Ok(MatchMode::StartsWith),
            "endsWith" => Ok(MatchMode::EndsWith),
            "notContains" => Ok(MatchMode::NotContains),
            "notEquals" => Ok(MatchMode::NotEquals),
            other => Err(GridError::configuration(format!(
                "unknown match mode '{other}', expected one of {}",
                MatchMode::ALL.join(", ")
            ))),
        }
    }
}

/// Builds filter predicates for resolved attributes.
///
/// Values an attribute cannot be compared against produce `None` rather than an
/// error: a single global search phrase is applied to many columns of different
/// kinds at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionBuilder {
    dialect: Dialect,
}

impl ConditionBuilder {
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn build(&self, attribute: &ResolvedAttribute, mode: MatchMode, value: &str) -> Option<SQL> {
        let column = SQL::column(attribute.column.clone());
        match attribute.kind {
            ValueKind::Text => Some(self.text(column, mode, value)),
            ValueKind::Integer => Self::integer(column, mode, value),
            ValueKind::Temporal => {
                // Tolerate full timestamps: compare on the date part only
                let date = value.split('T').next().unwrap_or(value);
                Some(self.text(self.dialect.date_text(column), mode, date))
            }
            ValueKind::Unsupported => None,
        }
    }

    fn text(&self, expr: SQL, mode: MatchMode, value: &str) -> SQL {
        match mode {
            MatchMode::Contains => contains(self.dialect, expr, value),
            MatchMode::Equals => eq(expr, SQL::parameter(value)),
            MatchMode::StartsWith => starts_with(self.dialect, expr, value),
            MatchMode::EndsWith => ends_with(self.dialect, expr, value),
            MatchMode::NotContains => not(contains(self.dialect, expr, value)),
            MatchMode::NotEquals => neq(expr, SQL::parameter(value)),
        }
    }

    fn integer(expr: SQL, mode: MatchMode, value: &str) -> Option<SQL> {
        let value: i64 = value.trim().parse().ok()?;
        match mode {
            MatchMode::Equals => Some(eq(expr, SQL::parameter(value))),
            MatchMode::NotEquals => Some(neq(expr, SQL::parameter(value))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnRef, Value};

    fn attribute(kind: ValueKind) -> ResolvedAttribute {
        ResolvedAttribute {
            path: "x".into(),
            column: ColumnRef::new("t0", "x"),
            kind,
        }
    }

    fn render(sql: Option<SQL>) -> Option<(String, Vec<Value>)> {
        sql.map(|sql| {
            let rendered = sql.render(Dialect::SQLite);
            (rendered.sql, rendered.params)
        })
    }

    #[test]
    fn match_mode_tokens_round_trip() {
        for token in MatchMode::ALL {
            assert_eq!(token.parse::<MatchMode>().unwrap().as_str(), *token);
        }
        assert!("like".parse::<MatchMode>().is_err());
        assert!("Contains".parse::<MatchMode>().is_err());
    }

    #[test]
    fn text_modes() {
        let builder = ConditionBuilder::new(Dialect::SQLite);
        let text = attribute(ValueKind::Text);

        let (sql, params) = render(builder.build(&text, MatchMode::Equals, "Bob")).unwrap();
        assert_eq!(sql, r#""t0"."x" = ?"#);
        assert_eq!(params, vec![Value::from("Bob")]);

        let (sql, _) = render(builder.build(&text, MatchMode::NotEquals, "Bob")).unwrap();
        assert_eq!(sql, r#""t0"."x" <> ?"#);

        let (sql, params) = render(builder.build(&text, MatchMode::NotContains, "b")).unwrap();
        assert_eq!(sql, r#"NOT (LOWER("t0"."x") LIKE LOWER(?) ESCAPE '\')"#);
        assert_eq!(params, vec![Value::from("%b%")]);
    }

    #[test]
    fn integer_only_supports_equality() {
        let builder = ConditionBuilder::new(Dialect::SQLite);
        let int = attribute(ValueKind::Integer);

        let (sql, params) = render(builder.build(&int, MatchMode::Equals, " 42 ")).unwrap();
        assert_eq!(sql, r#""t0"."x" = ?"#);
        assert_eq!(params, vec![Value::Integer(42)]);

        assert!(builder.build(&int, MatchMode::NotEquals, "-7").is_some());
        assert!(builder.build(&int, MatchMode::Contains, "42").is_none());
        assert!(builder.build(&int, MatchMode::StartsWith, "4").is_none());
        assert!(builder.build(&int, MatchMode::Equals, "forty").is_none());
        assert!(builder.build(&int, MatchMode::Equals, "4.5").is_none());
    }

    #[test]
    fn temporal_compares_date_part() {
        let builder = ConditionBuilder::new(Dialect::SQLite);
        let date = attribute(ValueKind::Temporal);

        let (sql, params) =
            render(builder.build(&date, MatchMode::Equals, "2024-03-05T10:00:00Z")).unwrap();
        assert_eq!(sql, r#"date("t0"."x") = ?"#);
        assert_eq!(params, vec![Value::from("2024-03-05")]);

        let (_, params) = render(builder.build(&date, MatchMode::StartsWith, "2024-03")).unwrap();
        assert_eq!(params, vec![Value::from("2024-03%")]);

        let pg = ConditionBuilder::new(Dialect::PostgreSQL)
            .build(&date, MatchMode::Contains, "03-05")
            .unwrap();
        assert_eq!(
            pg.sql(Dialect::PostgreSQL),
            r#"CAST(CAST("t0"."x" AS DATE) AS TEXT) ILIKE $1 ESCAPE '\'"#
        );
    }

    #[test]
    fn unsupported_never_builds() {
        let builder = ConditionBuilder::new(Dialect::SQLite);
        let blob = attribute(ValueKind::Unsupported);
        for token in MatchMode::ALL {
            let mode = token.parse().unwrap();
            assert!(builder.build(&blob, mode, "anything").is_none());
        }
    }
}
