//! Compiles interactive data-grid requests (global search, per-column filters,
//! multi-key ordering and paging) into SQL over a registered entity schema.
//!
//! The entry point is [`QueryCompiler`]. Storage engines plug in through
//! [`Backend`] or [`AsyncBackend`].

pub mod backend;
pub mod compiler;
pub mod condition;
pub mod config;
pub mod dialect;
pub mod error;
pub mod expressions;
pub mod join;
pub mod query;
pub mod request;
pub mod resolver;
pub mod response;
pub mod schema;
pub mod sql;
pub mod trace;
pub mod traits;
pub mod value;

// Re-export key types and traits
pub use backend::{AsyncBackend, Backend};
pub use compiler::{GridPlan, QueryCompiler};
pub use condition::{ConditionBuilder, MatchMode};
pub use config::{ConfigError, FilteredCount, GridConfig};
pub use dialect::Dialect;
pub use error::{BoxError, GridError, Result};
pub use join::{JoinEntry, JoinPlan, JoinType};
pub use query::{OrderDirection, ROOT_ALIAS, SelectColumn, SelectQuery};
pub use request::{ColumnSearch, ColumnSpec, OrderSpec, RequestSpec, SearchSpec};
pub use resolver::{ResolvedAttribute, SchemaResolver};
pub use response::ResponseEnvelope;
pub use schema::{EntityDescriptor, FieldDescriptor, RelationDescriptor, Schema, ValueKind};
pub use sql::{ColumnRef, Rendered, SQL, SQLChunk, TableRef};
pub use traits::ToSQL;
pub use value::Value;
