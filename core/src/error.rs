use thiserror::Error;

use compact_str::CompactString;

/// Boxed error produced by a backend adapter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum GridError {
    /// A path segment did not name a known relation or attribute
    #[error("Invalid column path: {path}")]
    InvalidColumn { path: CompactString },

    /// The request asked for something the compiler cannot express
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error raised by the backend while counting or fetching rows
    #[error("Backend error: {0}")]
    Backend(#[source] BoxError),
}

impl GridError {
    pub fn invalid_column(path: impl Into<CompactString>) -> Self {
        Self::InvalidColumn { path: path.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(error))
    }

    /// Returns the backend error as `E` if this error came from the backend.
    pub fn backend_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Backend(source) => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Result type for grid compilation and processing
pub type Result<T> = std::result::Result<T, GridError>;
