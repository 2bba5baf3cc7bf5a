//! Join types and the per-compile join plan.
//!
//! A [`JoinPlan`] records every relation traversed while resolving column paths
//! for one request. Each distinct path prefix gets exactly one alias, and the
//! plan remembers which entries were already merged into the query so a prefix
//! is never joined twice.

use compact_str::{CompactString, format_compact};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{
    ColumnRef, SQL, TableRef, ToSQL,
    expressions::conditions::eq,
    schema::{EntityDescriptor, RelationDescriptor},
};

/// The type of JOIN operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    /// Rows without a related entity drop out of the result
    Inner,
    /// Rows without a related entity are kept with NULL attributes
    #[default]
    Left,
}

impl ToSQL for JoinType {
    fn to_sql(&self) -> SQL {
        match self {
            JoinType::Inner => SQL::raw("INNER JOIN"),
            JoinType::Left => SQL::raw("LEFT JOIN"),
        }
    }
}

/// One traversed relation: the related table joined under its own alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinEntry {
    /// Relation chain up to and including this relation, e.g. `author.department`
    pub prefix: CompactString,
    /// Entity name the relation leads to
    pub target: CompactString,
    pub table: TableRef,
    /// `parent.local_key = alias.target_key`
    pub parent_key: ColumnRef,
    pub target_key: ColumnRef,
}

impl JoinEntry {
    pub fn alias(&self) -> &str {
        &self.table.alias
    }

    /// Renders `<join> "table" AS "tN" ON "parent"."fk" = "tN"."pk"`.
    pub fn to_sql(&self, join_type: JoinType) -> SQL {
        join_type
            .to_sql()
            .append(SQL::table(self.table.clone()))
            .append_raw("ON")
            .append(eq(&self.parent_key, &self.target_key))
    }
}

/// Ordered, deduplicated record of the relation traversals of one compile call.
#[derive(Debug, Clone)]
pub struct JoinPlan {
    root_alias: CompactString,
    entries: Vec<JoinEntry>,
    by_prefix: HashMap<CompactString, usize>,
    merged: usize,
}

impl JoinPlan {
    pub fn new(root_alias: impl Into<CompactString>) -> Self {
        Self {
            root_alias: root_alias.into(),
            entries: Vec::new(),
            by_prefix: HashMap::new(),
            merged: 0,
        }
    }

    pub fn root_alias(&self) -> &str {
        &self.root_alias
    }

    /// Index of the entry registered for `prefix`, if any.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.by_prefix.get(prefix).copied()
    }

    pub fn get(&self, prefix: &str) -> Option<&JoinEntry> {
        self.position(prefix).map(|i| &self.entries[i])
    }

    pub fn entry(&self, index: usize) -> &JoinEntry {
        &self.entries[index]
    }

    /// Registers a new traversal of `relation` from the entity aliased as
    /// `parent_alias`, returning the index of the new entry.
    ///
    /// Callers check [`position`](Self::position) first; registering a prefix
    /// twice returns the existing entry.
    pub fn register(
        &mut self,
        prefix: &str,
        parent_alias: &str,
        relation: &RelationDescriptor,
        target: &EntityDescriptor,
    ) -> usize {
        if let Some(existing) = self.position(prefix) {
            return existing;
        }

        let index = self.entries.len();
        let alias = format_compact!("{}_{}", self.root_alias, index + 1);
        self.entries.push(JoinEntry {
            prefix: prefix.into(),
            target: target.name.clone(),
            table: TableRef::new(target.table.clone(), alias.clone()),
            parent_key: ColumnRef::new(parent_alias, relation.local_key.clone()),
            target_key: ColumnRef::new(alias, relation.target_key.clone()),
        });
        self.by_prefix.insert(prefix.into(), index);
        index
    }

    /// Entries registered since the previous call, marking them merged.
    pub fn take_pending(&mut self) -> &[JoinEntry] {
        let start = self.merged;
        self.merged = self.entries.len();
        &self.entries[start..]
    }

    pub fn has_pending(&self) -> bool {
        self.merged < self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JoinEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
