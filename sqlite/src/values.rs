//! SQLite value conversions

use gridquery_core::Value;
use serde_json::{Map, Number, Value as JsonValue};
use std::borrow::Cow;

/// A value bound to or read from a SQLite statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SQLiteValue<'a> {
    /// Integer value (i64)
    Integer(i64),
    /// Real value (f64)
    Real(f64),
    /// Text value (borrowed or owned string)
    Text(Cow<'a, str>),
    /// Blob value (borrowed or owned binary data)
    Blob(Cow<'a, [u8]>),
    /// NULL value
    #[default]
    Null,
}

impl SQLiteValue<'_> {
    /// Converts a column value into its JSON representation.
    ///
    /// Blobs become arrays of bytes; non-finite reals become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            SQLiteValue::Integer(i) => JsonValue::from(*i),
            SQLiteValue::Real(r) => Number::from_f64(*r).map_or(JsonValue::Null, JsonValue::Number),
            SQLiteValue::Text(s) => JsonValue::String(s.clone().into_owned()),
            SQLiteValue::Blob(b) => JsonValue::Array(b.iter().map(|&byte| byte.into()).collect()),
            SQLiteValue::Null => JsonValue::Null,
        }
    }
}

impl<'a> From<&'a Value> for SQLiteValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => SQLiteValue::Null,
            Value::Integer(i) => SQLiteValue::Integer(*i),
            Value::Text(s) => SQLiteValue::Text(Cow::Borrowed(s.as_str())),
        }
    }
}

impl From<Value> for SQLiteValue<'static> {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SQLiteValue::Null,
            Value::Integer(i) => SQLiteValue::Integer(i),
            Value::Text(s) => SQLiteValue::Text(Cow::Owned(s.into_string())),
        }
    }
}

/// Builds a JSON object from column labels and their values.
pub fn json_object<'v, I>(columns: &[String], values: I) -> Map<String, JsonValue>
where
    I: IntoIterator<Item = SQLiteValue<'v>>,
{
    columns
        .iter()
        .cloned()
        .zip(values.into_iter().map(|v| v.to_json()))
        .collect()
}

#[cfg(feature = "rusqlite")]
impl rusqlite::ToSql for SQLiteValue<'_> {
    fn to_sql(&self) -> ::rusqlite::Result<::rusqlite::types::ToSqlOutput<'_>> {
        use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};

        Ok(match self {
            SQLiteValue::Null => ToSqlOutput::Owned(SqlValue::Null),
            SQLiteValue::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            SQLiteValue::Real(f) => ToSqlOutput::Owned(SqlValue::Real(*f)),
            SQLiteValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SQLiteValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b.as_ref())),
        })
    }
}

#[cfg(feature = "rusqlite")]
impl rusqlite::types::FromSql for SQLiteValue<'static> {
    fn column_result(
        value: rusqlite::types::ValueRef<'_>,
    ) -> rusqlite::types::FromSqlResult<Self> {
        use rusqlite::types::ValueRef;

        Ok(match value {
            ValueRef::Null => SQLiteValue::Null,
            ValueRef::Integer(i) => SQLiteValue::Integer(i),
            ValueRef::Real(r) => SQLiteValue::Real(r),
            ValueRef::Text(items) => {
                SQLiteValue::Text(Cow::Owned(String::from_utf8_lossy(items).into_owned()))
            }
            ValueRef::Blob(items) => SQLiteValue::Blob(Cow::Owned(items.to_vec())),
        })
    }
}
