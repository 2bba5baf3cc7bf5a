//! Dotted attribute path resolution.

use compact_str::CompactString;

use crate::{
    ColumnRef, SQL, ToSQL,
    error::{GridError, Result},
    join::JoinPlan,
    schema::{EntityDescriptor, Schema, ValueKind},
};

/// A path resolved to a concrete column, possibly reached through join aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    pub path: CompactString,
    pub column: ColumnRef,
    pub kind: ValueKind,
}

impl ToSQL for ResolvedAttribute {
    fn to_sql(&self) -> SQL {
        SQL::column(self.column.clone())
    }
}

/// Resolves paths such as `author.department.name` against the registered
/// entity descriptors, recording traversed relations in a [`JoinPlan`].
#[derive(Debug, Clone, Copy)]
pub struct SchemaResolver<'s> {
    schema: &'s Schema,
}

impl<'s> SchemaResolver<'s> {
    pub const fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    pub const fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Resolves `path` starting at `root`.
    ///
    /// Every segment but the last must name a relation of the entity reached so
    /// far; the last must name a field. Relation prefixes already present in
    /// `joins` reuse their alias, new ones are registered.
    pub fn resolve(
        &self,
        root: &'s EntityDescriptor,
        path: &str,
        joins: &mut JoinPlan,
    ) -> Result<ResolvedAttribute> {
        let (chain, attribute) = match path.rsplit_once('.') {
            Some((chain, attribute)) => (Some(chain), attribute),
            None => (None, path),
        };

        let mut entity = root;
        let mut qualifier = CompactString::from(joins.root_alias());

        if let Some(chain) = chain {
            let mut end = 0;
            for segment in chain.split('.') {
                end += segment.len();
                let prefix = &chain[..end];
                end += 1;

                let index = match joins.position(prefix) {
                    Some(index) => index,
                    None => {
                        let relation = entity
                            .find_relation(segment)
                            .ok_or_else(|| GridError::invalid_column(path))?;
                        let target = self.entity(&relation.target)?;
                        joins.register(prefix, &qualifier, relation, target)
                    }
                };

                let entry = joins.entry(index);
                entity = self.entity(&entry.target)?;
                qualifier = entry.table.alias.clone();
            }
        }

        let field = entity
            .find_field(attribute)
            .ok_or_else(|| GridError::invalid_column(path))?;

        Ok(ResolvedAttribute {
            path: path.into(),
            column: ColumnRef::new(qualifier, field.column()),
            kind: field.kind,
        })
    }

    fn entity(&self, name: &str) -> Result<&'s EntityDescriptor> {
        self.schema.entity(name).ok_or_else(|| {
            GridError::configuration(format!("entity '{name}' is not registered"))
        })
    }
}
