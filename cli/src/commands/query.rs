//! `gridquery query`: run a request against the configured database.

use std::path::Path;

use gridquery_core::QueryCompiler;
use gridquery_sqlite::RusqliteBackend;

use crate::{config::Config, error::CliError, output};

/// Prints the response envelope as JSON.
///
/// Returns `Ok(false)` when the envelope carries an error.
pub fn run(
    config: &Config,
    entity: &str,
    request: Option<&Path>,
    database: Option<&Path>,
    pretty: bool,
) -> Result<bool, CliError> {
    let request = super::read_request(request)?;
    let database = database
        .or(config.database.as_deref())
        .ok_or(CliError::NoDatabase)?;

    tracing::info!(database = %database.display(), entity, "running grid request");
    let backend = RusqliteBackend::open(database)?;
    let schema = config.schema();
    let response =
        QueryCompiler::with_config(&schema, config.grid.clone()).respond(&backend, entity, None, &request);

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    if let Some(error) = &response.error {
        eprintln!("{}", output::err_line(error));
        return Ok(false);
    }
    Ok(true)
}
