//! The request-to-query pipeline.
//!
//! [`QueryCompiler::compile`] is pure: it turns a [`RequestSpec`] into the
//! three query states the grid needs (base, filtered, paged) without touching a
//! backend. [`process`](QueryCompiler::process) and
//! [`process_async`](QueryCompiler::process_async) then hand those states to a
//! backend and assemble the [`ResponseEnvelope`].

use crate::{
    Dialect,
    backend::{AsyncBackend, Backend},
    condition::{ConditionBuilder, MatchMode},
    config::{FilteredCount, GridConfig},
    error::{GridError, Result},
    expressions::conditions::{and, or},
    grid_trace_stage,
    join::{JoinPlan, JoinType},
    query::{OrderDirection, SelectQuery},
    request::{ColumnSpec, RequestSpec},
    resolver::SchemaResolver,
    response::ResponseEnvelope,
    schema::{EntityDescriptor, Schema},
};

/// Compiled query states for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    pub draw: i64,
    /// Counted for `recordsTotal`
    pub total: SelectQuery,
    /// Counted for `recordsFiltered`
    pub filtered: SelectQuery,
    /// Executed for `data`
    pub page: SelectQuery,
}

/// Compiles grid requests against a registered [`Schema`].
///
/// The compiler holds no per-request state; one instance can serve any number
/// of requests, including concurrently.
#[derive(Debug, Clone)]
pub struct QueryCompiler<'s> {
    schema: &'s Schema,
    config: GridConfig,
}

impl<'s> QueryCompiler<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self::with_config(schema, GridConfig::default())
    }

    pub fn with_config(schema: &'s Schema, config: GridConfig) -> Self {
        Self { schema, config }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Builds the query states for `request` over the entity named `root`.
    ///
    /// `base` replaces the default "every row of `root`" query; its filters are
    /// part of every state, including the total.
    pub fn compile(
        &self,
        dialect: Dialect,
        root: &str,
        base: Option<SelectQuery>,
        request: &RequestSpec,
    ) -> Result<GridPlan> {
        let entity = self.schema.entity(root).ok_or_else(|| {
            GridError::configuration(format!("entity '{root}' is not registered"))
        })?;
        let base = base.unwrap_or_else(|| SelectQuery::for_entity(entity));

        let mut pipeline = Pipeline {
            entity,
            resolver: SchemaResolver::new(self.schema),
            conditions: ConditionBuilder::new(dialect),
            joins: JoinPlan::new(base.root_alias()),
            config: &self.config,
        };

        let total = base.clone();
        let searched = pipeline.global_search(base, request)?;
        let filtered = pipeline.column_filters(searched.clone(), &request.columns)?;
        let ordered = pipeline.ordering(filtered.clone(), request)?;

        let page = ordered
            .offset(request.start)
            .limit(self.config.page_limit(request.length));
        grid_trace_stage!("pagination", start = request.start, length = request.length);

        let filtered = match self.config.filtered_count {
            FilteredCount::AfterColumnFilters => filtered,
            FilteredCount::AfterGlobalSearch => searched,
        };

        Ok(GridPlan {
            draw: request.draw,
            total,
            filtered,
            page,
        })
    }

    /// Compiles `request` and runs it on `backend`: total count, filtered
    /// count, then the page of rows.
    pub fn process<B: Backend>(
        &self,
        backend: &B,
        root: &str,
        base: Option<SelectQuery>,
        request: &RequestSpec,
    ) -> Result<ResponseEnvelope<B::Row>> {
        let plan = self.compile(backend.dialect(), root, base, request)?;

        let total = backend.count(&plan.total).map_err(GridError::backend)?;
        let filtered = backend.count(&plan.filtered).map_err(GridError::backend)?;
        let rows = backend.execute(&plan.page).map_err(GridError::backend)?;

        Ok(ResponseEnvelope::new(plan.draw, total, filtered, rows))
    }

    /// Like [`process`](Self::process), with both counts in flight together.
    pub async fn process_async<B: AsyncBackend>(
        &self,
        backend: &B,
        root: &str,
        base: Option<SelectQuery>,
        request: &RequestSpec,
    ) -> Result<ResponseEnvelope<B::Row>> {
        let plan = self.compile(backend.dialect(), root, base, request)?;

        let (total, filtered) = futures_util::future::try_join(
            backend.count(&plan.total),
            backend.count(&plan.filtered),
        )
        .await
        .map_err(GridError::backend)?;
        let rows = backend
            .execute(&plan.page)
            .await
            .map_err(GridError::backend)?;

        Ok(ResponseEnvelope::new(plan.draw, total, filtered, rows))
    }

    /// Runs [`process`](Self::process), folding any failure into the envelope's
    /// `error` with the request's `draw` echoed.
    pub fn respond<B: Backend>(
        &self,
        backend: &B,
        root: &str,
        base: Option<SelectQuery>,
        request: &RequestSpec,
    ) -> ResponseEnvelope<B::Row> {
        self.process(backend, root, base, request)
            .unwrap_or_else(|error| failed(request.draw, error))
    }

    pub async fn respond_async<B: AsyncBackend>(
        &self,
        backend: &B,
        root: &str,
        base: Option<SelectQuery>,
        request: &RequestSpec,
    ) -> ResponseEnvelope<B::Row> {
        self.process_async(backend, root, base, request)
            .await
            .unwrap_or_else(|error| failed(request.draw, error))
    }
}

fn failed<R>(draw: i64, error: GridError) -> ResponseEnvelope<R> {
    #[cfg(feature = "tracing")]
    tracing::warn!(draw, error = %error, "gridquery.request_failed");
    ResponseEnvelope::failed(draw, error)
}

/// State shared by the stages of one compile call.
struct Pipeline<'s, 'c> {
    entity: &'s EntityDescriptor,
    resolver: SchemaResolver<'s>,
    conditions: ConditionBuilder,
    joins: JoinPlan,
    config: &'c GridConfig,
}

impl Pipeline<'_, '_> {
    /// Appends joins registered since the last merge.
    fn merge_joins(&mut self, mut query: SelectQuery, join_type: JoinType) -> SelectQuery {
        let pending = self.joins.take_pending();
        grid_trace_stage!("merge_joins", joins = pending.len());
        for entry in pending {
            query = query.join(entry.to_sql(join_type));
        }
        query
    }

    /// One `contains` predicate per searchable column, ORed together.
    fn global_search(&mut self, query: SelectQuery, request: &RequestSpec) -> Result<SelectQuery> {
        let value = self.config.search_value(&request.search.value);
        if value.is_empty() {
            return Ok(query);
        }

        let mut predicates = Vec::new();
        for column in request.columns.iter().filter(|c| is_searchable(c)) {
            let attribute = self.resolver.resolve(self.entity, &column.name, &mut self.joins)?;
            predicates.extend(self.conditions.build(&attribute, MatchMode::Contains, value));
        }
        grid_trace_stage!("global_search", predicates = predicates.len());

        // An inner join would drop rows matched on another column of the OR
        let query = self.merge_joins(query, JoinType::Left);
        Ok(match or(predicates) {
            Some(predicate) => query.filter(predicate),
            None => query,
        })
    }

    /// Each column's own filter with its own match mode, ANDed together.
    fn column_filters(&mut self, query: SelectQuery, columns: &[ColumnSpec]) -> Result<SelectQuery> {
        let mut predicates = Vec::new();
        for column in columns.iter().filter(|c| is_searchable(c)) {
            let value = self.config.search_value(&column.search.value);
            if value.is_empty() {
                continue;
            }
            let mode = match column.search.match_mode.as_deref() {
                Some(token) if !token.is_empty() => token.parse()?,
                _ => MatchMode::default(),
            };
            let attribute = self.resolver.resolve(self.entity, &column.name, &mut self.joins)?;
            predicates.extend(self.conditions.build(&attribute, mode, value));
        }
        grid_trace_stage!("column_filters", predicates = predicates.len());

        let query = self.merge_joins(query, self.config.join);
        Ok(match and(predicates) {
            Some(predicate) => query.filter(predicate),
            None => query,
        })
    }

    /// Order keys in request order; keys on non-orderable columns are skipped.
    fn ordering(&mut self, mut query: SelectQuery, request: &RequestSpec) -> Result<SelectQuery> {
        for key in &request.order {
            let column = request.columns.get(key.column).ok_or_else(|| {
                GridError::configuration(format!(
                    "order column index {} is out of range for {} columns",
                    key.column,
                    request.columns.len()
                ))
            })?;
            if !column.orderable || column.name.is_empty() {
                grid_trace_stage!("order_skipped", column = key.column);
                continue;
            }

            let direction: OrderDirection = key.dir.parse()?;
            let attribute = self.resolver.resolve(self.entity, &column.name, &mut self.joins)?;
            // Joined after the filtered count, so must not change the row set
            query = self.merge_joins(query, JoinType::Left);
            query = query.order_by(direction.apply(&attribute));
        }
        grid_trace_stage!("ordering", keys = query.ordering().len());
        Ok(query)
    }
}

fn is_searchable(column: &ColumnSpec) -> bool {
    column.searchable && !column.name.is_empty()
}
