//! The query being compiled: an owned SELECT over the root entity.
//!
//! Each compile step produces a new `SelectQuery` from the previous one, so the
//! total, filtered and paged states can all be kept and executed independently.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    ColumnRef, Dialect, GridError, SQL, TableRef, ToSQL, expressions::conditions::and,
    schema::EntityDescriptor, sql::Rendered,
};

/// Alias of the root entity in every compiled query.
pub const ROOT_ALIAS: &str = "t0";

/// Alias of the derived table wrapped by count queries.
const COUNT_ALIAS: &str = "grid_count";

/// Sort direction of one ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Creates an ascending ORDER BY key: "column ASC"
    pub fn asc<T: ToSQL>(expr: T) -> SQL {
        Self::Asc.apply(expr)
    }

    /// Creates a descending ORDER BY key: "column DESC"
    pub fn desc<T: ToSQL>(expr: T) -> SQL {
        Self::Desc.apply(expr)
    }

    pub fn apply<T: ToSQL>(self, expr: T) -> SQL {
        expr.into_sql().append(self.to_sql())
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

impl ToSQL for OrderDirection {
    fn to_sql(&self) -> SQL {
        match self {
            OrderDirection::Asc => SQL::raw("ASC"),
            OrderDirection::Desc => SQL::raw("DESC"),
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = GridError;

    /// Only the exact lowercase tokens are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            other => Err(GridError::configuration(format!(
                "invalid order direction '{other}', expected 'asc' or 'desc'"
            ))),
        }
    }
}

/// A column in the select list together with its output label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectColumn {
    pub column: ColumnRef,
    pub label: CompactString,
}

/// SELECT statement over a root table aliased as [`ROOT_ALIAS`].
///
/// Filters are ANDed together. The query renders for any [`Dialect`], and can
/// also be rendered as a row count of itself with [`count_sql`](Self::count_sql).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    from: TableRef,
    columns: Vec<SelectColumn>,
    joins: Vec<SQL>,
    filters: Vec<SQL>,
    order: Vec<SQL>,
    limit: Option<u64>,
    offset: u64,
}

impl SelectQuery {
    /// `SELECT "t0".* FROM "table" AS "t0"`; joined tables never widen the row.
    pub fn from_table(table: impl Into<CompactString>) -> Self {
        Self {
            from: TableRef::new(table, ROOT_ALIAS),
            columns: Vec::new(),
            joins: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: 0,
        }
    }

    /// Selects every scalar field of `entity`, labelled with the field name.
    pub fn for_entity(entity: &EntityDescriptor) -> Self {
        entity
            .fields
            .iter()
            .fold(Self::from_table(entity.table.clone()), |query, field| {
                query.select(field.column(), field.name.clone())
            })
    }

    /// Adds a root column to the select list.
    pub fn select(mut self, column: &str, label: impl Into<CompactString>) -> Self {
        self.columns.push(SelectColumn {
            column: ColumnRef::new(ROOT_ALIAS, column),
            label: label.into(),
        });
        self
    }

    pub fn join(mut self, join: SQL) -> Self {
        self.joins.push(join);
        self
    }

    pub fn filter(mut self, condition: SQL) -> Self {
        if !condition.is_empty() {
            self.filters.push(condition);
        }
        self
    }

    pub fn order_by(mut self, key: SQL) -> Self {
        self.order.push(key);
        self
    }

    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn root_alias(&self) -> &str {
        &self.from.alias
    }

    pub fn table(&self) -> &TableRef {
        &self.from
    }

    pub fn columns(&self) -> &[SelectColumn] {
        &self.columns
    }

    pub fn joins(&self) -> &[SQL] {
        &self.joins
    }

    pub fn filters(&self) -> &[SQL] {
        &self.filters
    }

    pub fn ordering(&self) -> &[SQL] {
        &self.order
    }

    pub fn page(&self) -> (u64, Option<u64>) {
        (self.offset, self.limit)
    }

    /// The statement without ordering or page window.
    fn body(&self) -> SQL {
        let columns = if self.columns.is_empty() {
            SQL::identifier(self.from.alias.clone()).append_raw(".*")
        } else {
            SQL::join(
                self.columns.iter().map(|c| {
                    SQL::column(c.column.clone())
                        .append_raw("AS")
                        .append(SQL::identifier(c.label.clone()))
                }),
                ", ",
            )
        };

        let mut sql = SQL::raw("SELECT")
            .append(columns)
            .append_raw("FROM")
            .append(SQL::table(self.from.clone()));

        for join in &self.joins {
            sql = sql.append(join.clone());
        }

        if let Some(condition) = and(self.filters.iter().cloned()) {
            sql = sql.append_raw("WHERE").append(condition);
        }
        sql
    }

    /// The full statement for `dialect`.
    pub fn to_sql(&self, dialect: Dialect) -> SQL {
        let mut sql = self.body();

        if !self.order.is_empty() {
            sql = sql
                .append_raw("ORDER BY")
                .append(SQL::join(self.order.iter().cloned(), ", "));
        }

        match self.limit {
            Some(limit) => sql = sql.append_raw(format!("LIMIT {limit}")),
            None if self.offset > 0 => {
                if let Some(unbounded) = dialect.unbounded_limit() {
                    sql = sql.append_raw(unbounded);
                }
            }
            None => {}
        }

        if self.offset > 0 {
            sql = sql.append_raw(format!("OFFSET {}", self.offset));
        }
        sql
    }

    /// `SELECT COUNT(*)` over this query, ignoring ordering and page window.
    pub fn count_sql(&self) -> SQL {
        SQL::raw("SELECT COUNT(*) FROM (")
            .append(self.body())
            .append_raw(") AS")
            .append(SQL::identifier(COUNT_ALIAS))
    }

    pub fn render(&self, dialect: Dialect) -> Rendered {
        self.to_sql(dialect).render(dialect)
    }

    pub fn render_count(&self, dialect: Dialect) -> Rendered {
        self.count_sql().render(dialect)
    }
}
