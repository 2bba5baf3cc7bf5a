//! Entity descriptors registered once at startup.
//!
//! Path resolution walks these tables instead of inspecting live types: each
//! entity lists its scalar fields (tagged with a [`ValueKind`]) and the relations
//! that can be traversed to reach other entities.

use compact_str::CompactString;
use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{GridError, Result};

/// Coarse semantic category of an attribute, deciding how it is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Integer,
    Temporal,
    #[default]
    Unsupported,
}

impl ValueKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Temporal => "temporal",
            ValueKind::Unsupported => "unsupported",
        }
    }

    /// Derives the kind from a declared SQL column type such as `VARCHAR(40)`,
    /// `BIGINT` or `TIMESTAMP WITH TIME ZONE`.
    ///
    /// Only the leading type name is considered; unknown names are `Unsupported`.
    pub fn from_declared_type(declared: &str) -> Self {
        let base = declared
            .trim()
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();

        match base.as_str() {
            "TEXT" | "VARCHAR" | "CHAR" | "CHARACTER" | "NCHAR" | "NVARCHAR" | "VARYING"
            | "CLOB" | "STRING" | "CITEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" => {
                ValueKind::Text
            }
            "INT" | "INTEGER" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "BIGINT" | "INT2"
            | "INT4" | "INT8" | "SERIAL" | "SMALLSERIAL" | "BIGSERIAL" => ValueKind::Integer,
            "DATE" | "TIME" | "DATETIME" | "TIMESTAMP" | "TIMESTAMPTZ" | "TIMETZ" => {
                ValueKind::Temporal
            }
            _ => ValueKind::Unsupported,
        }
    }

    /// Accepts either a kind name (`text`, `integer`, ...) or a declared SQL type.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => ValueKind::Text,
            "integer" => ValueKind::Integer,
            "temporal" => ValueKind::Temporal,
            "unsupported" => ValueKind::Unsupported,
            _ => Self::from_declared_type(value),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValueKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = CompactString::deserialize(deserializer)?;
        Ok(ValueKind::parse(&value))
    }
}

/// A scalar attribute of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: CompactString,
    /// Storage column; defaults to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    column: Option<CompactString>,
    #[serde(default)]
    pub kind: ValueKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<CompactString>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            column: None,
            kind,
        }
    }

    pub fn with_column(mut self, column: impl Into<CompactString>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }
}

/// A traversable link from one entity to another.
///
/// Joining renders `parent.local_key = target.target_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub name: CompactString,
    pub target: CompactString,
    pub local_key: CompactString,
    #[serde(default = "default_target_key")]
    pub target_key: CompactString,
}

fn default_target_key() -> CompactString {
    CompactString::const_new("id")
}

impl RelationDescriptor {
    pub fn new(
        name: impl Into<CompactString>,
        target: impl Into<CompactString>,
        local_key: impl Into<CompactString>,
        target_key: impl Into<CompactString>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            local_key: local_key.into(),
            target_key: target_key.into(),
        }
    }
}

/// Describes one entity type: its table, scalar fields and outgoing relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: CompactString,
    pub table: CompactString,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub relations: Vec<RelationDescriptor>,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<CompactString>, table: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            fields: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn text(self, name: impl Into<CompactString>) -> Self {
        self.field(FieldDescriptor::new(name, ValueKind::Text))
    }

    pub fn integer(self, name: impl Into<CompactString>) -> Self {
        self.field(FieldDescriptor::new(name, ValueKind::Integer))
    }

    pub fn temporal(self, name: impl Into<CompactString>) -> Self {
        self.field(FieldDescriptor::new(name, ValueKind::Temporal))
    }

    pub fn unsupported(self, name: impl Into<CompactString>) -> Self {
        self.field(FieldDescriptor::new(name, ValueKind::Unsupported))
    }

    pub fn relation(mut self, relation: RelationDescriptor) -> Self {
        self.relations.push(relation);
        self
    }

    /// Shorthand for a many-to-one relation keyed on the target's `id`.
    pub fn belongs_to(
        self,
        name: impl Into<CompactString>,
        target: impl Into<CompactString>,
        local_key: impl Into<CompactString>,
    ) -> Self {
        self.relation(RelationDescriptor::new(name, target, local_key, "id"))
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn find_relation(&self, name: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|relation| relation.name == name)
    }
}

/// Registry of entity descriptors, keyed by entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SchemaFile", into = "SchemaFile")]
pub struct Schema {
    entities: Vec<EntityDescriptor>,
    index: HashMap<CompactString, usize>,
}

#[derive(Serialize, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    entities: Vec<EntityDescriptor>,
}

impl From<SchemaFile> for Schema {
    fn from(file: SchemaFile) -> Self {
        file.entities.into_iter().fold(Schema::new(), Schema::with)
    }
}

impl From<Schema> for SchemaFile {
    fn from(schema: Schema) -> Self {
        SchemaFile {
            entities: schema.entities,
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity, replacing any previous entity with the same name.
    pub fn register(&mut self, entity: EntityDescriptor) {
        match self.index.get(&entity.name) {
            Some(&i) => self.entities[i] = entity,
            None => {
                self.index.insert(entity.name.clone(), self.entities.len());
                self.entities.push(entity);
            }
        }
    }

    pub fn with(mut self, entity: EntityDescriptor) -> Self {
        self.register(entity);
        self
    }

    pub fn entity(&self, name: &str) -> Option<&EntityDescriptor> {
        self.index.get(name).map(|&i| &self.entities[i])
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Checks that every relation targets a registered entity that declares
    /// the relation's target key.
    pub fn validate(&self) -> Result<()> {
        for entity in &self.entities {
            for relation in &entity.relations {
                let target = self.entity(&relation.target).ok_or_else(|| {
                    GridError::configuration(format!(
                        "relation '{}.{}' targets unknown entity '{}'",
                        entity.name, relation.name, relation.target
                    ))
                })?;
                if target.find_field(&relation.target_key).is_none()
                    && !target.fields.iter().any(|f| relation.target_key == f.column())
                {
                    return Err(GridError::configuration(format!(
                        "relation '{}.{}' joins on '{}', which '{}' does not declare",
                        entity.name, relation.name, relation.target_key, target.name
                    )));
                }
            }
        }
        Ok(())
    }
}
