//! # gridquery
//!
//! Compiles interactive data-grid requests into SQL over entities linked by
//! relations, and answers them with the counts and the page of rows the grid
//! needs.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "rusqlite")]
//! # fn main() -> gridquery::Result<()> {
//! use gridquery::prelude::*;
//! use gridquery::sqlite::RusqliteBackend;
//!
//! let schema = Schema::new()
//!     .with(EntityDescriptor::new("department", "departments").integer("id").text("name"))
//!     .with(
//!         EntityDescriptor::new("user", "users")
//!             .integer("id")
//!             .text("name")
//!             .belongs_to("department", "department", "department_id"),
//!     );
//!
//! let backend = RusqliteBackend::open_in_memory().map_err(GridError::backend)?;
//! backend
//!     .conn()
//!     .execute_batch(
//!         "CREATE TABLE departments (id INTEGER PRIMARY KEY, name TEXT);
//!          CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, department_id INTEGER);
//!          INSERT INTO departments VALUES (1, 'Research');
//!          INSERT INTO users VALUES (1, 'Ann Smith', 1), (2, 'Bob Jones', 1);",
//!     )
//!     .map_err(GridError::backend)?;
//!
//! let request = RequestSpec::new()
//!     .search("smith")
//!     .column(ColumnSpec::new("name"))
//!     .column(ColumnSpec::new("department.name"))
//!     .order_by(0, "asc");
//!
//! let response = QueryCompiler::new(&schema).process(&backend, "user", None, &request)?;
//! assert_eq!(response.records_total, 2);
//! assert_eq!(response.records_filtered, 1);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "rusqlite"))]
//! # fn main() {}
//! ```
//!
//! ## Backends
//!
//! | Database | Driver   | Feature Flag |
//! |----------|----------|--------------|
//! | SQLite   | rusqlite | `rusqlite`   |
//!
//! Other storage engines implement [`Backend`] or [`AsyncBackend`].

/// Result type for grid operations
pub use gridquery_core::error::Result;

/// Error types
pub mod error {
    pub use gridquery_core::error::{BoxError, GridError};
    pub use gridquery_core::config::ConfigError;
}

pub use gridquery_core::{
    AsyncBackend, Backend, ConditionBuilder, Dialect, GridConfig, GridError, GridPlan, JoinPlan,
    MatchMode, QueryCompiler, RequestSpec, ResponseEnvelope, Schema, SchemaResolver, SelectQuery,
};

/// Core types: SQL fragments, schema descriptors, request and response shapes.
pub mod core {
    pub use gridquery_core::*;

    /// Predicate helpers
    pub mod expr {
        pub use gridquery_core::expressions::conditions::*;
    }
}

/// SQLite backend
#[cfg(feature = "sqlite")]
pub mod sqlite {
    pub use gridquery_sqlite::{SQLiteValue, json_object};

    #[cfg(feature = "rusqlite")]
    pub use gridquery_sqlite::{JsonRow, RusqliteBackend};

    /// The rusqlite crate, for opening connections
    #[cfg(feature = "rusqlite")]
    pub use ::rusqlite;
}

pub mod prelude {
    pub use gridquery_core::{
        AsyncBackend, Backend, ColumnSpec, Dialect, EntityDescriptor, FieldDescriptor,
        GridConfig, GridError, MatchMode, OrderDirection, QueryCompiler, RelationDescriptor,
        RequestSpec, ResponseEnvelope, SQL, Schema, SelectQuery, ToSQL, ValueKind,
    };
}
