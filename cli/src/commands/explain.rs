//! `gridquery explain`: print the statements a request compiles to.

use std::path::Path;

use gridquery_core::{Dialect, QueryCompiler, Rendered};

use crate::{config::Config, error::CliError, output};

pub fn run(
    config: &Config,
    entity: &str,
    request: Option<&Path>,
    dialect: Option<Dialect>,
) -> Result<(), CliError> {
    let request = super::read_request(request)?;
    let dialect = dialect.unwrap_or(config.grid.dialect);
    let schema = config.schema();
    let plan = QueryCompiler::with_config(&schema, config.grid.clone())
        .compile(dialect, entity, None, &request)?;

    println!("{}", output::muted(&format!("-- {dialect}, draw {}", plan.draw)));
    print_statement("recordsTotal", plan.total.render_count(dialect));
    print_statement("recordsFiltered", plan.filtered.render_count(dialect));
    print_statement("data", plan.page.render(dialect));
    Ok(())
}

fn print_statement(name: &str, rendered: Rendered) {
    println!("{}", output::heading(&format!("-- {name}")));
    println!("{};", rendered.sql);
    if !rendered.params.is_empty() {
        let params: Vec<String> = rendered.params.iter().map(ToString::to_string).collect();
        println!("{} {}", output::label("-- params:"), params.join(", "));
    }
}
