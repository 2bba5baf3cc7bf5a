use serde::{Deserialize, Serialize};

/// The grid response: both totals plus one page of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<R> {
    pub draw: i64,
    /// Rows of the base query, ignoring every filter
    pub records_total: u64,
    /// Rows left after filtering, before pagination
    pub records_filtered: u64,
    pub data: Vec<R>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<R> ResponseEnvelope<R> {
    pub fn new(draw: i64, records_total: u64, records_filtered: u64, data: Vec<R>) -> Self {
        Self {
            draw,
            records_total,
            records_filtered,
            data,
            error: None,
        }
    }

    /// An aborted request: no rows, zero counts, the error message and the
    /// request's `draw` so the client can correlate it.
    pub fn failed(draw: i64, error: impl ToString) -> Self {
        Self {
            draw,
            records_total: 0,
            records_filtered: 0,
            data: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn map<T>(self, f: impl FnMut(R) -> T) -> ResponseEnvelope<T> {
        ResponseEnvelope {
            draw: self.draw,
            records_total: self.records_total,
            records_filtered: self.records_filtered,
            data: self.data.into_iter().map(f).collect(),
            error: self.error,
        }
    }
}
