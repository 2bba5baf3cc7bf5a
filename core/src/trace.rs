//! Tracing utilities for grid compilation and backend observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the SQL text and parameter count.
///
/// ```ignore
/// grid_trace_query!(&sql, params.len());
/// ```
#[macro_export]
macro_rules! grid_trace_query {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %$sql, params = $param_count, "gridquery.query");
    };
}

/// Emit a debug-level tracing event for a compiler pipeline stage.
///
/// ```ignore
/// grid_trace_stage!("global_search", predicates = conditions.len());
/// ```
#[macro_export]
macro_rules! grid_trace_stage {
    ($stage:literal $(, $key:ident = $value:expr)* $(,)?) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(stage = $stage $(, $key = $value)*, "gridquery.stage");
    };
}
