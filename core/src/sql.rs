use compact_str::{CompactString, ToCompactString};
use smallvec::{SmallVec, smallvec};
use std::fmt;

use crate::{Dialect, ToSQL, Value};

/// A table reference rendered as `"table" AS "alias"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub name: CompactString,
    pub alias: CompactString,
}

impl TableRef {
    pub fn new(name: impl Into<CompactString>, alias: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
        }
    }
}

/// A column qualified by the alias of the table (or join) it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub qualifier: CompactString,
    pub name: CompactString,
}

impl ColumnRef {
    pub fn new(qualifier: impl Into<CompactString>, name: impl Into<CompactString>) -> Self {
        Self {
            qualifier: qualifier.into(),
            name: name.into(),
        }
    }
}

/// A SQL chunk represents a part of an SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SQLChunk {
    Text(CompactString),
    Param(Value),
    /// A column reference that renders with its qualifier: `"t1"."name"`
    Column(ColumnRef),
    /// A table reference that renders with its alias: `"users" AS "t0"`
    Table(TableRef),
    /// A bare quoted identifier, used for output labels
    Ident(CompactString),
    SQL(Box<SQL>),
}

impl SQLChunk {
    fn write(&self, out: &mut Rendered, dialect: Dialect) {
        match self {
            SQLChunk::Text(text) => out.sql.push_str(text),
            SQLChunk::Param(value) => {
                out.params.push(value.clone());
                let placeholder = dialect.render_placeholder(out.params.len());
                out.sql.push_str(&placeholder);
            }
            SQLChunk::Column(column) => {
                dialect.quote_identifier(&mut out.sql, &column.qualifier);
                out.sql.push('.');
                dialect.quote_identifier(&mut out.sql, &column.name);
            }
            SQLChunk::Table(table) => {
                dialect.quote_identifier(&mut out.sql, &table.name);
                out.sql.push_str(" AS ");
                dialect.quote_identifier(&mut out.sql, &table.alias);
            }
            SQLChunk::Ident(ident) => dialect.quote_identifier(&mut out.sql, ident),
            SQLChunk::SQL(sql) => sql.write_to(out, dialect),
        }
    }

    fn is_empty_text(&self) -> bool {
        match self {
            SQLChunk::Text(text) => text.is_empty(),
            SQLChunk::SQL(sql) => sql.is_empty(),
            _ => false,
        }
    }

    /// Whether this chunk ends with a word character
    fn ends_word(&self) -> bool {
        match self {
            SQLChunk::Text(t) => t
                .chars()
                .last()
                .is_some_and(|last| !last.is_whitespace() && !['(', '.'].contains(&last)),
            SQLChunk::SQL(sql) => sql
                .chunks
                .iter()
                .rev()
                .find(|chunk| !chunk.is_empty_text())
                .is_some_and(SQLChunk::ends_word),
            SQLChunk::Param(_) | SQLChunk::Column(_) | SQLChunk::Table(_) | SQLChunk::Ident(_) => {
                true
            }
        }
    }

    /// Whether this chunk starts with a word character
    fn starts_word(&self) -> bool {
        match self {
            SQLChunk::Text(t) => t
                .chars()
                .next()
                .is_some_and(|first| !first.is_whitespace() && ![')', ',', '.'].contains(&first)),
            SQLChunk::SQL(sql) => sql
                .chunks
                .iter()
                .find(|chunk| !chunk.is_empty_text())
                .is_some_and(SQLChunk::starts_word),
            SQLChunk::Param(_) | SQLChunk::Column(_) | SQLChunk::Table(_) | SQLChunk::Ident(_) => {
                true
            }
        }
    }
}

/// SQL text with its bound parameters in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub params: Vec<Value>,
}

/// A SQL statement or fragment with parameters.
///
/// Fragments are composed by appending; rendering for a [`Dialect`] produces the
/// statement text and the parameters to bind, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SQL {
    /// The chunks that make up this SQL statement or fragment.
    pub chunks: SmallVec<[SQLChunk; 3]>,
}

impl SQL {
    /// Creates a new empty SQL fragment.
    pub const fn empty() -> Self {
        SQL {
            chunks: SmallVec::new_const(),
        }
    }

    /// Creates a new SQL fragment from a raw string.
    ///
    /// The string is treated as literal SQL text, not a parameter.
    pub fn raw(sql: impl AsRef<str>) -> Self {
        SQL {
            chunks: smallvec![SQLChunk::Text(sql.as_ref().to_compact_string())],
        }
    }

    /// Creates a new SQL fragment representing a bound parameter.
    pub fn parameter(value: impl Into<Value>) -> Self {
        SQL {
            chunks: smallvec![SQLChunk::Param(value.into())],
        }
    }

    pub fn column(column: ColumnRef) -> Self {
        SQL {
            chunks: smallvec![SQLChunk::Column(column)],
        }
    }

    pub fn table(table: TableRef) -> Self {
        SQL {
            chunks: smallvec![SQLChunk::Table(table)],
        }
    }

    pub fn identifier(name: impl Into<CompactString>) -> Self {
        SQL {
            chunks: smallvec![SQLChunk::Ident(name.into())],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(SQLChunk::is_empty_text)
    }

    /// Appends a raw string to this SQL fragment.
    pub fn append_raw(mut self, sql: impl AsRef<str>) -> Self {
        self.chunks
            .push(SQLChunk::Text(sql.as_ref().to_compact_string()));
        self
    }

    /// Appends another SQL fragment to this one.
    ///
    /// Both the SQL text and parameters are merged.
    pub fn append(mut self, other: impl Into<SQL>) -> Self {
        self.chunks.extend(other.into().chunks);
        self
    }

    /// Wraps this fragment in parentheses.
    pub fn parens(self) -> Self {
        SQL::raw("(").append(self).append_raw(")")
    }

    /// Joins multiple SQL fragments with a separator.
    ///
    /// The separator is inserted between each fragment, but not before the first or after the last.
    pub fn join<T>(sqls: T, separator: &'static str) -> SQL
    where
        T: IntoIterator,
        T::Item: ToSQL,
    {
        let mut chunks = SmallVec::new();
        for (i, sql) in sqls.into_iter().enumerate() {
            if i > 0 {
                chunks.push(SQLChunk::Text(CompactString::const_new(separator)));
            }
            chunks.push(SQLChunk::SQL(Box::new(sql.to_sql())));
        }
        SQL { chunks }
    }

    /// Returns references to parameter values from this SQL fragment in the correct order.
    pub fn params(&self) -> Vec<&Value> {
        let mut params = Vec::new();
        self.collect_params(&mut params);
        params
    }

    fn collect_params<'s>(&'s self, params: &mut Vec<&'s Value>) {
        for chunk in &self.chunks {
            match chunk {
                SQLChunk::Param(value) => params.push(value),
                SQLChunk::SQL(sql) => sql.collect_params(params),
                _ => {}
            }
        }
    }

    /// Renders the statement text and its parameters for `dialect`.
    pub fn render(&self, dialect: Dialect) -> Rendered {
        let mut out = Rendered::default();
        self.write_to(&mut out, dialect);
        out
    }

    /// Returns the SQL string for `dialect`, using placeholders for parameters.
    pub fn sql(&self, dialect: Dialect) -> String {
        self.render(dialect).sql
    }

    fn write_to(&self, out: &mut Rendered, dialect: Dialect) {
        for (i, chunk) in self.chunks.iter().enumerate() {
            chunk.write(out, dialect);
            if self.needs_space(i) {
                out.sql.push(' ');
            }
        }
    }

    fn needs_space(&self, index: usize) -> bool {
        let current = &self.chunks[index];
        if current.is_empty_text() {
            return false;
        }
        // Find next non-empty chunk
        match self.chunks[index + 1..]
            .iter()
            .find(|chunk| !chunk.is_empty_text())
        {
            Some(next) => current.ends_word() && next.starts_word(),
            None => false,
        }
    }
}

impl From<&str> for SQL {
    fn from(s: &str) -> Self {
        SQL::raw(s)
    }
}

impl From<ColumnRef> for SQL {
    fn from(column: ColumnRef) -> Self {
        SQL::column(column)
    }
}

impl fmt::Display for SQL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render(Dialect::SQLite);
        write!(f, r#"sql: "{}", params: {:?}"#, rendered.sql, rendered.params)
    }
}
