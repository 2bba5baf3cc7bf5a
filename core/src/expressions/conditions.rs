use crate::{Dialect, SQL, ToSQL};

/// Format a SQL comparison with the given operator
fn internal_format_sql_comparison<L, R>(left: L, operator: &'static str, right: R) -> SQL
where
    L: ToSQL,
    R: ToSQL,
{
    left.into_sql().append_raw(operator).append(right.into_sql())
}

/// Create an equality condition (=)
///
/// # Example
/// ```
/// # use gridquery_core::{Dialect, SQL, expressions::conditions::eq};
/// let condition = eq(SQL::raw("name"), SQL::parameter("Item A"));
/// assert_eq!(condition.sql(Dialect::SQLite), "name = ?");
/// ```
pub fn eq<L: ToSQL, R: ToSQL>(left: L, right: R) -> SQL {
    internal_format_sql_comparison(left, "=", right)
}

/// Create a not-equal condition (<>)
///
/// # Example
/// ```
/// # use gridquery_core::{Dialect, SQL, expressions::conditions::neq};
/// let condition = neq(SQL::raw("age"), SQL::parameter(30));
/// assert_eq!(condition.sql(Dialect::PostgreSQL), "age <> $1");
/// ```
pub fn neq<L: ToSQL, R: ToSQL>(left: L, right: R) -> SQL {
    internal_format_sql_comparison(left, "<>", right)
}

/// Escapes `%`, `_` and the escape character itself so `value` matches literally
/// inside a `LIKE` pattern rendered with [`Dialect::like_escape_clause`].
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Case-insensitive substring match: `%value%`
pub fn contains<E: ToSQL>(dialect: Dialect, expr: E, value: &str) -> SQL {
    let pattern = format!("%{}%", escape_like(value));
    dialect.like_ci(expr.into_sql(), SQL::parameter(pattern))
}

/// Case-insensitive prefix match: `value%`
pub fn starts_with<E: ToSQL>(dialect: Dialect, expr: E, value: &str) -> SQL {
    let pattern = format!("{}%", escape_like(value));
    dialect.like_ci(expr.into_sql(), SQL::parameter(pattern))
}

/// Case-insensitive suffix match: `%value`
pub fn ends_with<E: ToSQL>(dialect: Dialect, expr: E, value: &str) -> SQL {
    let pattern = format!("%{}", escape_like(value));
    dialect.like_ci(expr.into_sql(), SQL::parameter(pattern))
}

/// Create a NOT condition
pub fn not<T: ToSQL>(expression: T) -> SQL {
    SQL::raw("NOT").append(expression.into_sql().parens())
}

/// Combines conditions with `AND`, parenthesizing each operand.
///
/// Returns `None` for an empty set of conditions.
pub fn and<I>(conditions: I) -> Option<SQL>
where
    I: IntoIterator,
    I::Item: ToSQL,
{
    combine(conditions, "AND")
}

/// Combines conditions with `OR`, parenthesizing each operand.
///
/// Returns `None` for an empty set of conditions.
pub fn or<I>(conditions: I) -> Option<SQL>
where
    I: IntoIterator,
    I::Item: ToSQL,
{
    combine(conditions, "OR")
}

fn combine<I>(conditions: I, operator: &'static str) -> Option<SQL>
where
    I: IntoIterator,
    I::Item: ToSQL,
{
    let mut conditions = conditions.into_iter().map(ToSQL::into_sql).peekable();
    let first = conditions.next()?;
    if conditions.peek().is_none() {
        return Some(first);
    }
    Some(SQL::join(
        std::iter::once(first).chain(conditions).map(SQL::parens),
        operator,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnRef, Value};

    fn name() -> ColumnRef {
        ColumnRef::new("t0", "name")
    }

    #[test]
    fn escape_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), r"50\%\_off\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn contains_is_case_insensitive_per_dialect() {
        let sqlite = contains(Dialect::SQLite, name(), "Smith").render(Dialect::SQLite);
        assert_eq!(
            sqlite.sql,
            r#"LOWER("t0"."name") LIKE LOWER(?) ESCAPE '\'"#
        );
        assert_eq!(sqlite.params, vec![Value::from("%Smith%")]);

        let pg = contains(Dialect::PostgreSQL, name(), "Smith").render(Dialect::PostgreSQL);
        assert_eq!(pg.sql, r#""t0"."name" ILIKE $1 ESCAPE '\'"#);
    }

    #[test]
    fn prefix_and_suffix_patterns() {
        let start = starts_with(Dialect::SQLite, name(), "ab").render(Dialect::SQLite);
        assert_eq!(start.params, vec![Value::from("ab%")]);
        let end = ends_with(Dialect::SQLite, name(), "ab").render(Dialect::SQLite);
        assert_eq!(end.params, vec![Value::from("%ab")]);
    }

    #[test]
    fn combinators() {
        assert!(or(Vec::<SQL>::new()).is_none());

        let single = and([eq(name(), SQL::parameter("a"))]).unwrap();
        assert_eq!(single.sql(Dialect::SQLite), r#""t0"."name" = ?"#);

        let both = or([
            eq(name(), SQL::parameter("a")),
            eq(name(), SQL::parameter("b")),
        ])
        .unwrap();
        assert_eq!(
            both.sql(Dialect::SQLite),
            r#"("t0"."name" = ?) OR ("t0"."name" = ?)"#
        );

        let negated = not(eq(name(), SQL::parameter("a")));
        assert_eq!(negated.sql(Dialect::SQLite), r#"NOT ("t0"."name" = ?)"#);
    }
}
