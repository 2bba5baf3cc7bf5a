//! Grid request shape as sent by interactive data grids.
//!
//! Field names follow the DataTables server-side protocol. Directions and match
//! modes are kept as the raw tokens the client sent; the compiler validates them
//! so an invalid token surfaces as a configuration error for that request.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::condition::MatchMode;

/// One grid request: search, per-column filters, ordering and the page window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSpec {
    /// Opaque token echoed back in the response
    pub draw: i64,
    pub start: u64,
    /// Page size; any negative value requests all rows
    pub length: i64,
    pub search: SearchSpec,
    pub columns: Vec<ColumnSpec>,
    pub order: Vec<OrderSpec>,
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self {
            draw: 1,
            start: 0,
            length: 10,
            search: SearchSpec::default(),
            columns: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl RequestSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(mut self, draw: i64) -> Self {
        self.draw = draw;
        self
    }

    pub fn page(mut self, start: u64, length: i64) -> Self {
        self.start = start;
        self.length = length;
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search.value = value.into();
        self
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    pub fn order_by(mut self, column: usize, dir: impl Into<CompactString>) -> Self {
        self.order.push(OrderSpec {
            column,
            dir: dir.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSpec {
    pub value: String,
}

/// A grid column bound to a dotted attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    /// Dotted attribute path, e.g. `author.department.name`
    pub name: CompactString,
    pub searchable: bool,
    pub orderable: bool,
    pub search: ColumnSearch,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            name: CompactString::default(),
            searchable: true,
            orderable: true,
            search: ColumnSearch::default(),
        }
    }
}

impl ColumnSpec {
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn orderable(mut self, orderable: bool) -> Self {
        self.orderable = orderable;
        self
    }

    /// Sets this column's own filter, independent of the global search.
    pub fn filter(mut self, value: impl Into<String>, mode: MatchMode) -> Self {
        self.search = ColumnSearch {
            value: value.into(),
            match_mode: Some(mode.as_str().into()),
        };
        self
    }
}

/// Per-column filter value and match mode token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnSearch {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<CompactString>,
}

/// One ordering key, addressing a column by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub column: usize,
    #[serde(default = "default_dir")]
    pub dir: CompactString,
}

fn default_dir() -> CompactString {
    CompactString::const_new("asc")
}
