//! SQLite backend for `gridquery`.
//!
//! Enable the `rusqlite` feature for [`RusqliteBackend`], which runs compiled
//! grid queries on a [`rusqlite::Connection`] and returns rows as JSON objects.

pub mod values;

#[cfg(feature = "rusqlite")]
pub mod connection;

#[cfg(feature = "rusqlite")]
pub use connection::{JsonRow, RusqliteBackend};
pub use values::{SQLiteValue, json_object};
