//! Execution seam between the compiler and a storage engine.
//!
//! Backends receive fully compiled [`SelectQuery`] states and render them for
//! their own [`Dialect`]. Their errors are opaque to the compiler, which only
//! wraps and propagates them.

use std::future::Future;

use crate::{Dialect, query::SelectQuery};

/// Blocking backend.
pub trait Backend {
    type Row;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Dialect predicates and statements are rendered for.
    fn dialect(&self) -> Dialect;

    /// Row count of `query`, ignoring its ordering and page window.
    fn count(&self, query: &SelectQuery) -> Result<u64, Self::Error>;

    /// Materializes the rows of the paged `query`.
    fn execute(&self, query: &SelectQuery) -> Result<Vec<Self::Row>, Self::Error>;
}

impl<B: Backend + ?Sized> Backend for &B {
    type Row = B::Row;
    type Error = B::Error;

    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn count(&self, query: &SelectQuery) -> Result<u64, Self::Error> {
        (**self).count(query)
    }

    fn execute(&self, query: &SelectQuery) -> Result<Vec<Self::Row>, Self::Error> {
        (**self).execute(query)
    }
}

/// Async counterpart of [`Backend`].
///
/// Both counts of one request may be in flight at the same time, so
/// implementations must accept concurrent calls through `&self`.
pub trait AsyncBackend {
    type Row;
    type Error: std::error::Error + Send + Sync + 'static;

    fn dialect(&self) -> Dialect;

    fn count(&self, query: &SelectQuery) -> impl Future<Output = Result<u64, Self::Error>>;

    fn execute(
        &self,
        query: &SelectQuery,
    ) -> impl Future<Output = Result<Vec<Self::Row>, Self::Error>>;
}
