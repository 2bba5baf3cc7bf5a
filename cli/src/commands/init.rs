//! `gridquery init`: write a starter config.

use std::path::Path;

use crate::{config::CONFIG_FILE, error::CliError, output};

const TEMPLATE: &str = r#"# gridquery configuration
database = "./app.db"

[grid]
# join = "inner"          # column-filter joins; search and ordering always join LEFT
# max-page-length = 100
# filtered-count = "after-global-search"

[[entities]]
name = "user"
table = "users"
fields = [
    { name = "id", kind = "integer" },
    { name = "name", kind = "text" },
    { name = "created", column = "created_at", kind = "temporal" },
]
"#;

pub fn run(dir: &Path) -> Result<(), CliError> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        return Err(CliError::Other(format!(
            "{CONFIG_FILE} already exists. Delete it first to reinitialize."
        )));
    }

    std::fs::write(&path, TEMPLATE).map_err(|e| CliError::IoError(e.to_string()))?;
    println!("{}", output::success(&format!("Created {CONFIG_FILE}")));
    Ok(())
}
