//! CLI command implementations
//!
//! Each command module implements a specific gridquery CLI command.

pub mod check;
pub mod explain;
pub mod init;
pub mod query;

use std::io::Read;
use std::path::Path;

use gridquery_core::RequestSpec;

use crate::error::CliError;

/// Reads a grid request from `path`, or from stdin when `path` is absent or `-`.
pub fn read_request(path: Option<&Path>) -> Result<RequestSpec, CliError> {
    let content = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| CliError::IoError(format!("{}: {e}", path.display())))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::IoError(e.to_string()))?;
            buf
        }
    };
    Ok(serde_json::from_str(&content)?)
}
