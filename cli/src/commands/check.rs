//! `gridquery check`: validate the config and list the registered entities.

use crate::{config::Config, error::CliError, output};

pub fn run(config: &Config) -> Result<(), CliError> {
    let schema = config.schema();
    for entity in schema.entities() {
        println!(
            "{} {} {}",
            output::label(&entity.name),
            output::muted(&format!("({})", entity.table)),
            output::muted(&format!(
                "{} fields, {} relations",
                entity.fields.len(),
                entity.relations.len()
            )),
        );
        for relation in &entity.relations {
            println!(
                "  {} -> {} on {} = {}",
                relation.name, relation.target, relation.local_key, relation.target_key
            );
        }
    }
    println!("{}", output::success(&format!("OK: {} entities", schema.len())));
    Ok(())
}
