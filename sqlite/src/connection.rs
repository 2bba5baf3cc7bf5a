//! Grid backend over a rusqlite connection.

use gridquery_core::{Backend, Dialect, Rendered, SelectQuery, grid_trace_query};
use rusqlite::{Connection, params_from_iter};
use serde_json::{Map, Value as JsonValue};

use crate::values::{SQLiteValue, json_object};

/// One result row keyed by column label.
pub type JsonRow = Map<String, JsonValue>;

/// Runs grid queries on a single [`Connection`].
#[derive(Debug)]
pub struct RusqliteBackend {
    conn: Connection,
}

impl RusqliteBackend {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: impl AsRef<std::path::Path>) -> rusqlite::Result<Self> {
        Connection::open(path).map(Self::new)
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Connection::open_in_memory().map(Self::new)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl From<Connection> for RusqliteBackend {
    fn from(conn: Connection) -> Self {
        Self::new(conn)
    }
}

fn bind(params: &[gridquery_core::Value]) -> Vec<SQLiteValue<'_>> {
    params.iter().map(SQLiteValue::from).collect()
}

impl Backend for RusqliteBackend {
    type Row = JsonRow;
    type Error = rusqlite::Error;

    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn count(&self, query: &SelectQuery) -> rusqlite::Result<u64> {
        let Rendered { sql, params } = query.render_count(Dialect::SQLite);
        grid_trace_query!(&sql, params.len());

        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(bind(&params)), |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn execute(&self, query: &SelectQuery) -> rusqlite::Result<Vec<JsonRow>> {
        let Rendered { sql, params } = query.render(Dialect::SQLite);
        grid_trace_query!(&sql, params.len());

        let mut stmt = self.conn.prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let rows = stmt.query_map(params_from_iter(bind(&params)), |row| {
            let values = (0..columns.len())
                .map(|i| row.get::<_, SQLiteValue<'static>>(i))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(json_object(&columns, values))
        })?;

        rows.collect()
    }
}
